mod ec;
mod qr;

pub(crate) use qr::QR;

use tracing::{debug, debug_span, trace};

use crate::common::{
    arena::Arena,
    codec,
    error::QRResult,
    mask::{apply_best_mask, MaskPattern},
    metadata::{ECLevel, Version},
};
use crate::symbol::Symbol;

pub use ec::ec_capacity;

pub struct QRBuilder<'a> {
    data: &'a [u8],
    version: Option<Version>,
    ec_level: ECLevel,
    mask: Option<MaskPattern>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, version: None, ec_level: ECLevel::M, mask: None }
    }

    pub fn data(&mut self, data: &'a [u8]) -> &mut Self {
        self.data = data;
        self
    }

    /// Fixes the version. Payloads too long for it are truncated.
    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = Some(version);
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.version = None;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    /// Forces a mask instead of picking the lowest penalty one.
    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn unset_mask(&mut self) -> &mut Self {
        self.mask = None;
        self
    }

    pub fn metadata(&self) -> String {
        match self.version {
            Some(v) => format!("{{ Version: {}, Ec level: {:?} }}", *v, self.ec_level),
            None => format!("{{ Version: None, Ec level: {:?} }}", self.ec_level),
        }
    }

    /// Fixed version if set, otherwise the smallest one holding the payload.
    pub fn resolve_version(&self) -> QRResult<Version> {
        match self.version {
            Some(v) => Ok(v),
            None => Version::fitting(self.data.len(), self.ec_level),
        }
    }
}


// Build
//------------------------------------------------------------------------------

impl QRBuilder<'_> {
    /// Encodes into a heap buffer sized exactly for the resolved version.
    pub fn build(&self) -> QRResult<Symbol> {
        let version = self.resolve_version()?;
        let mut buffer = vec![0; Arena::required_size(version, self.ec_level)];
        let mut arena = Arena::new(&mut buffer);
        self.build_with(version, &mut arena)
    }

    /// Encodes using caller owned memory. Fails with `ArenaExhausted` when the
    /// arena has less than [`Arena::required_size`] bytes left.
    pub fn build_in(&self, arena: &mut Arena) -> QRResult<Symbol> {
        let version = self.resolve_version()?;
        self.build_with(version, arena)
    }

    fn build_with(&self, version: Version, arena: &mut Arena) -> QRResult<Symbol> {
        let _span = debug_span!("build", version = *version, ec_level = ?self.ec_level).entered();
        debug!(len = self.data.len(), "Generating QR {}", self.metadata());

        let mut session = EncodeSession::new(self.data, version, self.ec_level, arena)?;

        debug!("Drawing encoding region");
        session.place();

        let mask = session.select_mask(self.mask);
        debug!(mask = *mask, "Mask applied");

        let symbol = session.finish(mask);
        report(&symbol, self.data.len());
        Ok(symbol)
    }
}

/// Encodes `data` at `ec_level`, picking the smallest fitting version when
/// `version` is `None`.
pub fn encode(data: &[u8], ec_level: ECLevel, version: Option<Version>) -> QRResult<Symbol> {
    let mut builder = QRBuilder::new(data);
    builder.ec_level(ec_level);
    if let Some(v) = version {
        builder.version(v);
    }
    builder.build()
}

fn report(symbol: &Symbol, data_len: usize) {
    let version = symbol.version();
    let ec_level = symbol.ec_level();
    let total_modules = symbol.width() * symbol.width();
    let dark_modules = symbol.count_dark_modules();

    debug!(
        data_capacity = version.data_capacity(ec_level),
        ec_capacity = ec_capacity(version, ec_level),
        data_len,
        encoded_len = symbol.encoded_len(),
        dark_modules,
        light_modules = total_modules - dark_modules,
        balance = dark_modules * 100 / total_modules,
        "QR generated {}",
        symbol.metadata()
    );
}

// Encode session
//------------------------------------------------------------------------------

/// State of one in-flight encode. Every buffer lives in the arena the
/// session was created from.
pub(crate) struct EncodeSession<'a> {
    qr: QR<'a>,
    // Interleaved data & ecc codewords
    codewords: &'a [u8],
    // Run length scratch for mask scoring
    runs: &'a mut [u8],
    encoded_len: usize,
}

impl<'a> EncodeSession<'a> {
    /// Builds the data stream, its error correction and the function
    /// patterns. Nothing is placed yet.
    pub fn new(
        data: &[u8],
        version: Version,
        ec_level: ECLevel,
        arena: &mut Arena<'a>,
    ) -> QRResult<Self> {
        let layout = version.block_layout(ec_level);
        debug!(?layout, "Constructing payload with ecc & interleaving");

        let mut qr = QR::new(version, ec_level, arena)?;

        let stream = arena.alloc_zeroed(layout.data_capacity())?;
        let encoded_len = codec::encode(data, version, ec_level, stream);

        let generator = arena.alloc_zeroed(layout.ecc_width + 1)?;
        ec::build_generator(generator);

        let ecc = arena.alloc_zeroed(layout.ecc_codewords())?;
        for (block, block_ecc) in ec::blockify(stream, layout).zip(ecc.chunks_mut(layout.ecc_width)) {
            ec::encode_block(block, generator, block_ecc);
        }

        let codewords = arena.alloc_zeroed(layout.total_codewords())?;
        let n = ec::interleave(ec::blockify(stream, layout), codewords);
        ec::interleave(ecc.chunks(layout.ecc_width), &mut codewords[n..]);

        let runs = arena.alloc_zeroed(version.width() + 1)?;

        debug!("Drawing functional patterns");
        qr.draw_all_function_patterns();

        Ok(Self { qr, codewords, runs, encoded_len })
    }

    pub fn place(&mut self) -> usize {
        self.qr.draw_encoding_region(self.codewords)
    }

    /// Applies `forced` if given, otherwise the lowest penalty mask, and
    /// writes the matching format word.
    pub fn select_mask(&mut self, forced: Option<MaskPattern>) -> MaskPattern {
        let mask = match forced {
            Some(m) => {
                self.qr.set_mask(m);
                m
            }
            None => apply_best_mask(&mut self.qr, self.runs),
        };
        trace!(mask = *mask, dark_modules = self.qr.count_dark_modules(), "Masked symbol");
        mask
    }

    pub fn finish(self, mask: MaskPattern) -> Symbol {
        debug_assert!(self.qr.mask() == Some(mask), "Symbol finished with a different mask");
        Symbol::new(&self.qr, mask, self.encoded_len)
    }
}
