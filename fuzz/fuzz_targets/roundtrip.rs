#![no_main]
use bitpacker::{BitPacker, Codec, Kind};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (Vec<u32>, bool, usize)| {
    let (values, choose_overflow, probe) = data;

    for kind in Kind::ALL {
        let mut codec = Codec::new(kind, choose_overflow);
        codec.compress(&values);
        assert_eq!(codec.decompress(), values);
        assert_eq!(codec.len(), values.len());

        if values.is_empty() {
            assert_eq!(codec.size_bits(), 0);
            assert!(codec.get(probe).is_err());
            continue;
        }

        let i = probe % values.len();
        assert_eq!(codec.get(i).unwrap(), values[i]);
        assert!(codec.get(values.len()).is_err());
    }
});
