#[cfg(test)]
mod qr_proptests {
    use proptest::prelude::*;

    use qrbits::*;

    pub fn ec_level_strategy() -> BoxedStrategy<ECLevel> {
        prop_oneof![Just(ECLevel::L), Just(ECLevel::M), Just(ECLevel::Q), Just(ECLevel::H)].boxed()
    }

    pub fn qr_strategy() -> impl Strategy<Value = (ECLevel, String)> {
        ec_level_strategy().prop_flat_map(|ecl| {
            let max_sz = Version::MAX.max_payload(ecl);
            let pattern = format!(r"[ -~]{{0,{max_sz}}}");
            prop::string::string_regex(&pattern).unwrap().prop_map(move |data| (ecl, data))
        })
    }

    proptest! {
        #[test]
        #[ignore]
        fn proptest_round_trip(params in qr_strategy()) {
            let (ecl, data) = params;

            let symbol = QRBuilder::new(data.as_bytes()).ec_level(ecl).build().unwrap();

            let mut img = rqrr::PreparedImage::prepare(symbol.to_image(3));
            let grids = img.detect_grids();
            prop_assert_eq!(grids.len(), 1);
            let (meta, decoded) = grids[0].decode().expect("Failed to read QR");

            prop_assert_eq!(meta.version.0, *symbol.version() as usize);
            prop_assert_eq!(data, decoded);
        }
    }
}

#[cfg(test)]
mod qr_tests {
    use test_case::test_case;

    use qrbits::{encode, Arena, ECLevel, MaskPattern, QRBuilder, QRError, Version};

    // Printable ascii filling the whole payload capacity
    fn payload(len: usize) -> String {
        (0..len).map(|i| (b'!' + (i * 7 % 94) as u8) as char).collect()
    }

    fn decode(symbol: &qrbits::Symbol) -> (usize, String) {
        let mut img = rqrr::PreparedImage::prepare(symbol.to_image(4));
        let grids = img.detect_grids();
        assert_eq!(grids.len(), 1);
        let (meta, content) = grids[0].decode().unwrap();
        (meta.version.0, content)
    }

    #[test]
    fn test_url_symbol() {
        let symbol = encode(b"http://www.mageec.com", ECLevel::L, None).unwrap();
        assert_eq!(*symbol.version(), 2);
        assert_eq!(symbol.width(), 25);
        assert_eq!(*symbol.mask(), 1);
        assert_eq!(
            symbol.as_bytes(),
            [
                254, 154, 191, 128, 130, 238, 160, 128, 186, 62, 174, 128, 186, 38, 46, 128, 186,
                246, 46, 128, 130, 148, 160, 128, 254, 170, 191, 128, 0, 186, 128, 0, 230, 225, 249,
                128, 25, 101, 245, 128, 194, 17, 38, 128, 225, 194, 244, 0, 195, 89, 224, 128, 105,
                77, 177, 128, 207, 45, 6, 128, 32, 91, 176, 0, 219, 231, 249, 0, 0, 132, 138, 128,
                254, 16, 172, 128, 130, 197, 137, 0, 186, 29, 252, 128, 186, 9, 95, 0, 186, 239,
                201, 128, 130, 186, 248, 0, 254, 230, 164, 128
            ]
        );
    }

    #[test]
    fn test_empty_symbol() {
        let symbol = QRBuilder::new(b"").build().unwrap();
        assert_eq!(*symbol.version(), 1);
        assert_eq!(symbol.ec_level(), ECLevel::M);
        assert_eq!(*symbol.mask(), 0);
        assert_eq!(symbol.encoded_len(), 0);
        assert_eq!(
            symbol.as_bytes(),
            [
                254, 11, 248, 130, 186, 8, 186, 42, 232, 186, 18, 232, 186, 154, 232, 130, 114, 8,
                254, 171, 248, 0, 0, 0, 170, 104, 144, 101, 85, 80, 86, 87, 112, 240, 253, 216, 182,
                247, 112, 0, 130, 48, 254, 104, 136, 130, 66, 48, 186, 138, 168, 186, 21, 80, 186,
                151, 104, 130, 93, 208, 254, 151, 120
            ]
        );
    }

    #[test]
    fn test_fixed_version_symbol() {
        let symbol = QRBuilder::new(b"Hello, world!")
            .version(Version::new(3).unwrap())
            .ec_level(ECLevel::H)
            .build()
            .unwrap();
        assert_eq!(*symbol.mask(), 7);
        assert_eq!(symbol.metadata(), "{ Version: 3, Ec level: H, Mask: 7 }");
        assert_eq!(
            symbol.as_bytes(),
            [
                254, 173, 203, 248, 130, 147, 234, 8, 186, 16, 226, 232, 186, 253, 178, 232, 186,
                165, 98, 232, 130, 207, 122, 8, 254, 170, 171, 248, 0, 22, 144, 0, 18, 85, 65, 216,
                89, 185, 92, 184, 102, 206, 238, 80, 92, 165, 133, 144, 91, 222, 146, 32, 221, 63,
                253, 88, 19, 194, 10, 72, 1, 139, 104, 128, 139, 137, 193, 192, 81, 140, 216, 112,
                151, 75, 67, 248, 17, 25, 7, 8, 175, 57, 47, 208, 0, 163, 248, 184, 254, 119, 10,
                224, 130, 101, 8, 176, 186, 8, 239, 152, 186, 151, 155, 248, 186, 90, 212, 168,
                130, 100, 147, 48, 254, 79, 67, 112
            ]
        );
    }

    #[test]
    fn test_forced_best_mask_matches_auto() {
        let auto = encode(b"http://www.mageec.com", ECLevel::L, None).unwrap();
        let forced = QRBuilder::new(b"http://www.mageec.com")
            .ec_level(ECLevel::L)
            .mask(MaskPattern::new(1).unwrap())
            .build()
            .unwrap();
        assert_eq!(auto, forced);
    }

    #[test]
    fn test_dark_module() {
        for v in [1, 7, 40] {
            let version = Version::new(v).unwrap();
            let symbol = encode(b"dark", ECLevel::Q, Some(version)).unwrap();
            assert!(symbol.get(8, symbol.width() - 8));
        }
    }

    #[test]
    fn test_arena_reuse() {
        let version = Version::new(4).unwrap();
        let mut buffer = vec![0xAA; Arena::required_size(version, ECLevel::M)];
        let first = {
            let mut arena = Arena::new(&mut buffer);
            QRBuilder::new(b"first").version(version).build_in(&mut arena).unwrap()
        };
        let mut arena = Arena::new(&mut buffer);
        let second = QRBuilder::new(b"first").version(version).build_in(&mut arena).unwrap();
        assert_eq!(arena.remaining(), 0);
        assert_eq!(first, second);
        assert_eq!(first, encode(b"first", ECLevel::M, Some(version)).unwrap());
    }

    #[test]
    fn test_arena_too_small() {
        let version = Version::new(2).unwrap();
        let mut buffer = vec![0; 100];
        let mut arena = Arena::new(&mut buffer);
        let err = QRBuilder::new(b"tiny").version(version).build_in(&mut arena).unwrap_err();
        assert_eq!(err, QRError::ArenaExhausted { requested: 100, remaining: 0 });
    }

    #[test]
    fn test_data_too_long() {
        let data = vec![b'a'; 2954];
        let err = encode(&data, ECLevel::L, None).unwrap_err();
        assert_eq!(err, QRError::DataTooLong { len: 2954, ec_level: ECLevel::L });
        assert!(encode(&data[..2953], ECLevel::L, None).is_ok());
    }

    #[test]
    fn test_truncation() {
        let data = payload(40);
        let symbol = encode(data.as_bytes(), ECLevel::L, Some(Version::new(1).unwrap())).unwrap();
        assert_eq!(symbol.encoded_len(), 17);

        let (version, content) = decode(&symbol);
        assert_eq!(version, 1);
        assert_eq!(content, data[..17]);
    }

    #[test_case(1)]
    #[test_case(2)]
    #[test_case(5)]
    #[test_case(7)]
    #[test_case(10)]
    #[test_case(14)]
    #[test_case(21)]
    #[test_case(27)]
    #[test_case(33)]
    #[test_case(40)]
    fn test_round_trip(v: u8) {
        let version = Version::new(v).unwrap();
        for ec_level in ECLevel::ALL {
            let data = payload(version.max_payload(ec_level));
            let symbol = QRBuilder::new(data.as_bytes()).ec_level(ec_level).build().unwrap();
            assert_eq!(symbol.version(), version, "{ec_level:?}");

            let (decoded_version, content) = decode(&symbol);
            assert_eq!(decoded_version, v as usize);
            assert_eq!(content, data);
        }
    }

    #[test_case("Hello, world!🌎", ECLevel::L)]
    #[test_case("TEST", ECLevel::M)]
    #[test_case("12345", ECLevel::Q)]
    #[test_case("OK", ECLevel::H)]
    fn test_utf8_round_trip(data: &str, ec_level: ECLevel) {
        let symbol = encode(data.as_bytes(), ec_level, None).unwrap();
        let (_, content) = decode(&symbol);
        assert_eq!(content, data);
    }
}
