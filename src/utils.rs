use rand::distributions::Alphanumeric;
use rand::Rng;

pub(crate) const NONCE_LEN: usize = 32;

/// Random alphanumeric string drawn from the calling thread's RNG.
pub(crate) fn random_nonce(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_random_nonce_length_and_charset() {
        let nonce = random_nonce(NONCE_LEN);
        assert_eq!(nonce.len(), 32);
        assert!(nonce.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_random_nonce_zero_length() {
        assert!(random_nonce(0).is_empty());
    }

    #[test]
    fn test_random_nonce_is_unique() {
        let nonces: HashSet<String> = (0..1_000).map(|_| random_nonce(NONCE_LEN)).collect();
        assert_eq!(nonces.len(), 1_000);
    }

    #[test]
    fn test_random_nonce_across_threads() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| random_nonce(NONCE_LEN)))
            .collect();
        let nonces: HashSet<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(nonces.len(), 8);
    }
}
