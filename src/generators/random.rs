// src/generators/random.rs
use rand::distributions::{Distribution, Uniform};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

/// The 62 symbols random passwords are drawn from.
pub const ALPHABET: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                                  abcdefghijklmnopqrstuvwxyz\
                                  0123456789";

/// Random alphanumeric string of exactly `length` characters, drawn from the OS CSPRNG.
pub fn generate(length: usize) -> String {
    generate_with(&mut OsRng, length)
}

/// Same as [`generate`] with a caller-supplied cryptographic source.
pub fn generate_with<R>(rng: &mut R, length: usize) -> String
where
    R: RngCore + CryptoRng + ?Sized,
{
    let index = Uniform::from(0..ALPHABET.len());
    (0..length)
        .map(|_| ALPHABET[index.sample(rng)] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use std::collections::HashMap;

    #[test]
    fn produces_requested_length() {
        for length in [0, 1, 8, 10, 64, 500] {
            assert_eq!(generate(length).chars().count(), length);
        }
    }

    #[test]
    fn zero_length_is_empty() {
        assert_eq!(generate(0), "");
    }

    #[test]
    fn only_alphabet_symbols() {
        let password = generate(2_000);
        assert!(password.bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn alphabet_has_62_distinct_symbols() {
        let mut seen: Vec<u8> = ALPHABET.to_vec();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 62);
        assert!(seen.iter().all(u8::is_ascii_alphanumeric));
    }

    #[test]
    fn single_characters_are_roughly_uniform() {
        let mut rng = ChaCha20Rng::seed_from_u64(0x5eed);
        let per_symbol = 2_000;
        let mut counts: HashMap<char, usize> = HashMap::new();
        for _ in 0..ALPHABET.len() * per_symbol {
            let c = generate_with(&mut rng, 1).chars().next().unwrap();
            *counts.entry(c).or_default() += 1;
        }

        assert_eq!(counts.len(), ALPHABET.len());
        for (symbol, count) in counts {
            assert!(
                (per_symbol * 3 / 4..=per_symbol * 5 / 4).contains(&count),
                "symbol {symbol} drawn {count} times"
            );
        }
    }

    #[test]
    fn os_source_covers_whole_alphabet() {
        let sample = generate(62 * 300);
        for symbol in ALPHABET.iter() {
            assert!(sample.as_bytes().contains(symbol));
        }
    }

    #[test]
    fn consecutive_calls_differ() {
        assert_ne!(generate(32), generate(32));
    }
}
