use std::error::Error;

use qrbits::{Arena, ECLevel, QRBuilder, Version};

fn main() -> Result<(), Box<dyn Error>> {
    let messages: [&[u8]; 3] = [b"first", b"second message", b"https://example.com/third"];

    // One buffer sized for the largest symbol serves every encode
    let version = Version::new(3)?;
    let ec_level = ECLevel::Q;
    let mut buffer = vec![0u8; Arena::required_size(version, ec_level)];

    for msg in messages {
        // Wrapping the buffer again starts from an empty arena
        let mut arena = Arena::new(&mut buffer);
        let symbol = QRBuilder::new(msg).version(version).ec_level(ec_level).build_in(&mut arena)?;

        println!("{} using {} of {} bytes", symbol.metadata(), arena.used(), arena.capacity());
        println!("{}", symbol.to_str(1));
    }

    Ok(())
}
