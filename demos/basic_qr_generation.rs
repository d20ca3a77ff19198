use std::error::Error;

use qrbits::QRBuilder;

fn main() -> Result<(), Box<dyn Error>> {
    // Simplest usage - provide only data, version and mask are chosen automatically
    let symbol = QRBuilder::new(b"Hello, World!").build()?;
    println!("Generated {}", symbol.metadata());

    // Convert to image and save
    let img = symbol.to_image(4); // 4x scale factor
    img.save("simple_qr.png")?;

    println!("Simple QR code saved to: simple_qr.png");
    Ok(())
}
