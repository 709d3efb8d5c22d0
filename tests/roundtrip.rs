//! Round-trip and length-law properties across the public API.

use std::io::Cursor;

use sixbit::{Alphabet, StreamingEncoder, decode, encode};

fn patterned(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i.wrapping_mul(31) ^ len) as u8).collect()
}

#[test]
fn round_trip_every_length_up_to_10000_padded() {
    let alphabet = Alphabet::standard();
    for len in 1..10_000 {
        let data = patterned(len);
        let encoded = encode(&data, &alphabet);
        assert_eq!(encoded.len(), alphabet.encoded_len(len), "length {}", len);
        assert_eq!(decode(&encoded, &alphabet).unwrap(), data, "length {}", len);
    }
}

#[test]
fn round_trip_every_length_up_to_10000_unpadded() {
    let alphabet = Alphabet::url_safe();
    for len in 1..10_000 {
        let data = patterned(len);
        let encoded = encode(&data, &alphabet);
        assert_eq!(encoded.len(), alphabet.encoded_len(len), "length {}", len);
        assert_eq!(decode(&encoded, &alphabet).unwrap(), data, "length {}", len);
    }
}

#[test]
fn empty_input_encodes_to_empty_string() {
    for alphabet in [Alphabet::standard(), Alphabet::standard_no_pad()] {
        assert_eq!(encode(b"", &alphabet), "");
        assert_eq!(alphabet.encoded_len(0), 0);
    }
}

#[test]
fn random_data_round_trips_under_every_builtin() {
    use rand::RngCore;

    let mut rng = rand::rng();
    let alphabets = [
        Alphabet::standard(),
        Alphabet::standard_no_pad(),
        Alphabet::url_safe(),
        Alphabet::url_safe_padded(),
    ];

    for _ in 0..200 {
        let mut data = vec![0u8; 4096];
        rng.fill_bytes(&mut data);
        for alphabet in &alphabets {
            let encoded = encode(&data, alphabet);
            assert_eq!(decode(&encoded, alphabet).unwrap(), data);
        }
    }
}

#[test]
fn streaming_large_input_obeys_length_law() {
    let alphabet = Alphabet::standard();
    let data = patterned(150_000);

    let mut streamed = Vec::new();
    let written = StreamingEncoder::new(&alphabet, &mut streamed)
        .encode(&mut Cursor::new(&data))
        .unwrap();

    assert_eq!(written as usize, alphabet.encoded_len(data.len()));
    assert_eq!(streamed.len(), alphabet.encoded_len(data.len()));

    let one_shot = encode(&data, &alphabet);
    assert_eq!(streamed, one_shot.as_bytes());
}

#[test]
fn streaming_large_input_unpadded_residues() {
    // Residue 1 and 2 totals exercise the tail hand-off at the final chunk.
    let alphabet = Alphabet::standard_no_pad();
    for len in [150_000, 150_001, 150_002] {
        let data = patterned(len);
        let mut streamed = Vec::new();
        StreamingEncoder::new(&alphabet, &mut streamed)
            .encode(&mut Cursor::new(&data))
            .unwrap();
        assert_eq!(streamed.len(), alphabet.encoded_len(len), "length {}", len);
        assert_eq!(streamed, encode(&data, &alphabet).as_bytes(), "length {}", len);
    }
}
