use crate::common::{
    galois::{exp, log, LOG_ZERO},
    metadata::{BlockLayout, ECLevel, Version},
};

// Generator polynomial
//------------------------------------------------------------------------------

/// Fills `poly` with the generator of degree `poly.len() - 1`, the product of
/// (x + a^i) for i in 0..degree. Coefficients are stored as discrete logs,
/// constant term first, leading term last.
pub fn build_generator(poly: &mut [u8]) {
    debug_assert!(!poly.is_empty(), "Generator needs room for the leading term");
    let degree = poly.len() - 1;

    poly.fill(0);
    poly[0] = 1;
    for i in 0..degree {
        poly[i + 1] = 1;
        for j in (1..=i).rev() {
            poly[j] = match poly[j] {
                0 => poly[j - 1],
                c => poly[j - 1] ^ exp(log(c) as usize + i),
            };
        }
        poly[0] = exp(log(poly[0]) as usize + i);
    }

    for c in poly.iter_mut() {
        debug_assert!(*c != 0, "Generator coefficient vanished");
        *c = log(*c);
    }
}

// Block encoder
//------------------------------------------------------------------------------

/// Computes the `ecc.len()` error correction codewords of `data` with a
/// feedback shift register. `generator` must have degree `ecc.len()`.
pub fn encode_block(data: &[u8], generator: &[u8], ecc: &mut [u8]) {
    let n = ecc.len();
    debug_assert!(
        generator.len() == n + 1,
        "Generator degree doesn't match ecc length: Degree {}, Ecc len {n}",
        generator.len().saturating_sub(1)
    );

    ecc.fill(0);
    if n == 0 {
        return;
    }

    for &d in data {
        let feedback = log(d ^ ecc[0]);
        if feedback == LOG_ZERO {
            ecc.copy_within(1.., 0);
            ecc[n - 1] = 0;
            continue;
        }
        let fb = feedback as usize;
        for j in 1..n {
            ecc[j - 1] = ecc[j] ^ exp(fb + generator[n - j] as usize);
        }
        ecc[n - 1] = exp(fb + generator[0] as usize);
    }
}

// Block split & interleave
//------------------------------------------------------------------------------

/// Splits the data stream into its short blocks followed by its long blocks.
pub fn blockify(data: &[u8], layout: BlockLayout) -> impl Iterator<Item = &[u8]> + Clone {
    debug_assert!(
        data.len() == layout.data_capacity(),
        "Data len doesn't match total size of blocks: Data len {}, Total block size {}",
        data.len(),
        layout.data_capacity()
    );

    let (short, long) = data.split_at(layout.short_count * layout.data_width);
    short.chunks(layout.data_width).chain(long.chunks(layout.data_width + 1))
}

/// Writes byte i of every block in turn into `out`, skipping blocks that are
/// too short. Returns the number of bytes written.
pub fn interleave<'b, I>(blocks: I, out: &mut [u8]) -> usize
where
    I: Iterator<Item = &'b [u8]> + Clone,
{
    let max_block_size = blocks.clone().map(|b| b.len()).max().unwrap_or(0);
    let mut n = 0;
    for i in 0..max_block_size {
        for b in blocks.clone() {
            if let Some(&v) = b.get(i) {
                out[n] = v;
                n += 1;
            }
        }
    }
    n
}

/// Number of erroneous codewords the symbol can correct.
pub fn ec_capacity(version: Version, ec_level: ECLevel) -> usize {
    let p = match (*version, ec_level) {
        (1, ECLevel::L) => 3,
        (2, ECLevel::L) | (1, ECLevel::M) => 2,
        (1, _) | (3, ECLevel::L) => 1,
        _ => 0,
    };

    (version.block_layout(ec_level).ecc_codewords() - p) / 2
}

#[cfg(test)]
mod ec_tests {
    use proptest::prelude::*;
    use test_case::test_case;

    use super::{blockify, build_generator, ec_capacity, encode_block, interleave};
    use crate::common::{
        galois::{exp, log},
        metadata::{ECLevel, Version},
    };

    fn ecc(data: &[u8], ecc_count: usize) -> Vec<u8> {
        let mut generator = vec![0; ecc_count + 1];
        build_generator(&mut generator);
        let mut res = vec![0; ecc_count];
        encode_block(data, &generator, &mut res);
        res
    }

    fn mul(a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        exp(log(a) as usize + log(b) as usize)
    }

    // Evaluates the codeword polynomial, first byte as highest power, at a^i
    fn syndrome(codeword: &[u8], i: usize) -> u8 {
        let root = exp(i);
        codeword.iter().fold(0, |acc, &c| mul(acc, root) ^ c)
    }

    #[test]
    fn test_generator_degree_7() {
        let mut generator = [0; 8];
        build_generator(&mut generator);
        assert_eq!(generator, [21, 102, 238, 149, 146, 229, 87, 0]);
    }

    #[test]
    fn test_generator_degree_10() {
        let mut generator = [0; 11];
        build_generator(&mut generator);
        assert_eq!(generator, [45, 32, 94, 64, 70, 118, 61, 46, 67, 251, 0]);
    }

    #[test]
    fn test_poly_mod_1() {
        let res = ecc(b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11", 10);
        assert_eq!(&*res, b"\xc4#'w\xeb\xd7\xe7\xe2]\x17");
    }

    #[test]
    fn test_poly_mod_2() {
        let res = ecc(b" [\x0bx\xd1r\xdcMC@\xec\x11\xec", 13);
        assert_eq!(&*res, b"\xa8H\x16R\xd96\x9c\x00.\x0f\xb4z\x10");
    }

    #[test]
    fn test_poly_mod_3() {
        let res = ecc(b"CUF\x86W&U\xc2w2\x06\x12\x06g&", 18);
        assert_eq!(&*res, b"\xd5\xc7\x0b-s\xf7\xf1\xdf\xe5\xf8\x9au\x9aoV\xa1o'");
    }

    #[test]
    fn test_zero_block() {
        assert_eq!(ecc(&[0; 19], 7), vec![0; 7]);
    }

    #[test]
    fn test_multi_block() {
        let msg = b"CUF\x86W&U\xc2w2\x06\x12\x06g&\xf6\xf6B\x07v\x86\xf2\x07&V\x16\xc6\xc7\x92\x06\
                    \xb6\xe6\xf7w2\x07v\x86W&R\x06\x86\x972\x07F\xf7vV\xc2\x06\x972\x10\xec\x11\xec\
                    \x11\xec\x11\xec";
        let expected_ecc = [
            b"\xd5\xc7\x0b\x2d\x73\xf7\xf1\xdf\xe5\xf8\x9a\x75\x9a\x6f\x56\xa1\x6f\x27",
            b"\x57\xcc\x60\x3c\xca\xb6\x7c\x9d\xc8\x86\x1b\x81\xd1\x11\xa3\xa3\x78\x85",
            b"\x94\x74\xb1\xd4\x4c\x85\x4b\xf2\xee\x4c\xc3\xe6\xbd\x0a\x6c\xf0\xc0\x8d",
            b"\xeb\x9f\x05\xad\x18\x93\x3b\x21\x6a\x28\xff\xac\x52\x02\x83\x20\xb2\xec",
        ];
        let layout = Version::new(5).unwrap().block_layout(ECLevel::Q);
        let blocks = blockify(msg, layout).collect::<Vec<_>>();
        assert_eq!(blocks.iter().map(|b| b.len()).collect::<Vec<_>>(), [15, 15, 16, 16]);
        for (block, expected) in blocks.iter().zip(expected_ecc) {
            assert_eq!(&*ecc(block, layout.ecc_width), expected);
        }
    }

    #[test]
    fn test_interleave() {
        let blocks: [&[u8]; 3] = [&[1, 2], &[3, 4], &[5, 6, 7]];
        let mut out = [0; 7];
        let n = interleave(blocks.iter().copied(), &mut out);
        assert_eq!(n, 7);
        assert_eq!(out, [1, 3, 5, 2, 4, 6, 7]);
    }

    #[test]
    fn test_codewords_divisible_for_every_layout() {
        for v in Version::all() {
            for ecl in ECLevel::ALL {
                let layout = v.block_layout(ecl);
                for width in [layout.data_width, layout.data_width + 1] {
                    let data = (0..width).map(|i| (i * 31 + *v as usize) as u8).collect::<Vec<_>>();
                    let mut codeword = data.clone();
                    codeword.extend(ecc(&data, layout.ecc_width));
                    for i in 0..layout.ecc_width {
                        assert_eq!(syndrome(&codeword, i), 0, "version {}, {ecl:?}", *v);
                    }
                }
            }
        }
    }

    #[test_case(1, ECLevel::L, 2)]
    #[test_case(1, ECLevel::H, 8)]
    #[test_case(5, ECLevel::Q, 36)]
    #[test_case(40, ECLevel::H, 1215)]
    fn test_ec_capacity(v: u8, ecl: ECLevel, exp: usize) {
        assert_eq!(ec_capacity(Version::new(v).unwrap(), ecl), exp);
    }

    proptest! {
        #[test]
        fn proptest_codeword_roots(
            data in prop::collection::vec(any::<u8>(), 1..=123),
            ecc_count in 7usize..=30,
        ) {
            let mut codeword = data.clone();
            codeword.extend(ecc(&data, ecc_count));
            for i in 0..ecc_count {
                prop_assert_eq!(syndrome(&codeword, i), 0);
            }
        }

        #[test]
        fn proptest_ecc_is_linear(
            pair in prop::collection::vec(any::<(u8, u8)>(), 1..=60),
        ) {
            let (a, b): (Vec<u8>, Vec<u8>) = pair.into_iter().unzip();
            let sum = a.iter().zip(&b).map(|(x, y)| x ^ y).collect::<Vec<_>>();
            let expected = ecc(&a, 16).iter().zip(ecc(&b, 16)).map(|(x, y)| x ^ y).collect::<Vec<_>>();
            prop_assert_eq!(ecc(&sum, 16), expected);
        }
    }
}
