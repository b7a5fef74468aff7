use huffchunk::{
    build_decoder, build_encoder, chunk::chunks, compress, compress_with, decode_body, decompress,
    decompress_with, estimate_compressed_size, ChunkLayout, Decoder, HuffError, Options,
    DEFAULT_CHUNK_SIZE,
};

const FILE_PATH: &str = "./tests/resources/dna_seq_test.txt";

struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }

    fn bytes(&mut self, len: usize) -> Vec<u8> {
        (0..len).map(|_| self.next() as u8).collect()
    }
}

/// 90% `e`, the rest spread over 200 other byte values.
fn skewed_input(len: usize) -> Vec<u8> {
    let mut rng = XorShift(0x9e37_79b9_7f4a_7c15);
    (0..len)
        .map(|_| {
            let r = rng.next();
            if r % 10 != 0 {
                b'e'
            } else {
                (110 + (r >> 8) % 200) as u8
            }
        })
        .collect()
}

/// Serialize to deserialize test
#[test]
fn serialize_and_deserialize_test() {
    let original: String = std::fs::read_to_string(FILE_PATH).unwrap();

    let container = compress(original.as_bytes()).unwrap();
    assert!(container.len() < original.len());

    let actual = decompress(&container).unwrap();
    assert_eq!(String::from_utf8(actual).unwrap(), original);
}

#[test]
fn aaab_round_trips() {
    assert_eq!(decompress(&compress(b"aaab").unwrap()).unwrap(), b"aaab");
}

#[test]
fn single_symbol_round_trips() {
    assert_eq!(decompress(&compress(b"zzzz").unwrap()).unwrap(), b"zzzz");
    assert_eq!(decompress(&compress(&[0]).unwrap()).unwrap(), vec![0]);
}

#[test]
fn skewed_input_spans_chunks_and_round_trips() {
    let original = skewed_input(50_000);
    let parts = build_encoder(&original).unwrap();
    assert!(parts.body.len() > DEFAULT_CHUNK_SIZE, "body is {} bytes", parts.body.len());

    let context = build_decoder(&parts.dictionary).unwrap();
    assert_eq!(decode_body(&context, &parts.body).unwrap(), original);
}

#[test]
fn chunks_decode_independently() {
    let original = skewed_input(50_000);
    let parts = build_encoder(&original).unwrap();
    let context = build_decoder(&parts.dictionary).unwrap();
    let decoder = Decoder::new(context.code_table()).unwrap();

    let mut decoded = Vec::new();
    let mut count = 0;
    for chunk in chunks(&parts.body, ChunkLayout::default()) {
        decoded.extend(decoder.decode(chunk.unwrap()).unwrap());
        count += 1;
    }
    assert!(count >= 2);
    assert_eq!(decoded, original);
}

#[test]
fn every_byte_value_round_trips() {
    let original: Vec<u8> = (0..=255u8).cycle().take(256 * 9 + 17).collect();
    assert_eq!(decompress(&compress(&original).unwrap()).unwrap(), original);
}

#[test]
fn random_inputs_round_trip() {
    let mut rng = XorShift(0x2545_f491_4f6c_dd1d);
    for len in [1usize, 2, 3, 7, 64, 255, 1024, 12_345] {
        let original = rng.bytes(len);
        assert_eq!(decompress(&compress(&original).unwrap()).unwrap(), original, "len {}", len);
    }
}

#[test]
fn small_chunks_round_trip() {
    let options = Options::with_chunk_size(33).unwrap();
    let mut rng = XorShift(0xdead_beef_cafe_f00d);
    let mut original = skewed_input(3_000);
    original.extend(rng.bytes(3_000));

    let container = compress_with(&original, options).unwrap();
    assert_eq!(decompress_with(&container, options).unwrap(), original);
}

#[test]
fn estimate_is_exact() {
    let original = skewed_input(50_000);
    assert_eq!(
        estimate_compressed_size(&original).unwrap(),
        compress(&original).unwrap().len()
    );
}

#[test]
fn empty_input_is_rejected() {
    assert!(matches!(compress(&[]), Err(HuffError::InvalidInput { .. })));
}

#[test]
fn truncated_dictionary_is_rejected() {
    let container = compress(b"abracadabra").unwrap();
    let dictionary_len = build_decoder(&container).unwrap().dictionary_len();

    assert!(matches!(
        decompress(&container[..dictionary_len - 1]),
        Err(HuffError::UnexpectedEndOfStream { .. })
    ));
}

#[test]
fn duplicate_dictionary_entry_is_rejected() {
    let container = [1, 0b0000_0000, b'a', 1, 0b1000_0000, b'a', 0, 1, 0];
    assert_eq!(
        decompress(&container),
        Err(HuffError::DuplicateSymbol { symbol: b'a' })
    );
}

#[test]
fn cli_round_trips_piped_input() {
    use std::{
        io::Write,
        process::{Command, Stdio},
    };

    let dir = std::env::temp_dir().join(format!("huffchunk-cli-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let original = std::fs::read(FILE_PATH).unwrap();

    let run = |args: &[&str], input: &[u8]| {
        let mut child = Command::new(env!("CARGO_BIN_EXE_huffchunk"))
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()
            .unwrap();
        child.stdin.take().unwrap().write_all(input).unwrap();
        assert!(child.wait().unwrap().success());
    };

    let plain = dir.join("dna.txt");
    run(&["-c", "-o", plain.to_str().unwrap()], &original);
    let compressed = std::fs::read(dir.join("dna.txt.huff")).unwrap();

    let restored = dir.join("restored.txt.huff");
    run(&["-d", "-o", restored.to_str().unwrap()], &compressed);
    assert_eq!(std::fs::read(dir.join("restored.txt")).unwrap(), original);

    std::fs::remove_dir_all(&dir).unwrap();
}
