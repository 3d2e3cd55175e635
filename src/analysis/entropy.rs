//! Shannon entropy calculation and printable string extraction.
//!
//! Exact byte-frequency entropy for the inspector. This runs once per
//! pointer event on a 64-byte window, unlike the renderer's per-pixel
//! variation proxy, so there is no need to approximate.

/// Calculate Shannon entropy for a byte slice.
///
/// Shannon entropy measures the average information content per byte.
/// Values range from 0 (completely uniform) to 8 (maximum randomness).
pub fn calculate_entropy(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }

    let mut counts = [0u32; 256];
    for &byte in data {
        counts[byte as usize] += 1;
    }

    // H = -sum(p * log2(p)) rearranged as log2(n) - (1/n) * sum(c * log2(c)),
    // which is exact for the degenerate windows (all-equal, all-distinct).
    let total = data.len() as f64;
    let log2_total = total.log2();
    let mut sum_c_log_c = 0.0f64;

    for &count in &counts {
        if count > 0 {
            let c = count as f64;
            sum_c_log_c += c * c.log2();
        }
    }

    log2_total - sum_c_log_c / total
}

/// Extract the first printable ASCII string (length > 4) from data.
pub fn extract_ascii(data: &[u8]) -> Option<String> {
    let mut current = String::new();

    for &byte in data {
        if byte >= 32 && byte <= 126 {
            current.push(byte as char);
        } else {
            if current.len() > 4 {
                return Some(current);
            }
            current.clear();
        }
    }

    if current.len() > 4 {
        Some(current)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entropy_uniform() {
        // A window of identical bytes carries no information.
        assert_eq!(calculate_entropy(&[0, 0, 0, 0]), 0.0);
        assert_eq!(calculate_entropy(&[0xAB; 256]), 0.0);
    }

    #[test]
    fn test_entropy_four_distinct() {
        // Four equiprobable symbols: exactly 2 bits.
        assert_eq!(calculate_entropy(&[0x00, 0x01, 0x02, 0x03]), 2.0);
    }

    #[test]
    fn test_entropy_max() {
        // All 256 byte values once: maximum 8 bits.
        let data: Vec<u8> = (0..=255).collect();
        let entropy = calculate_entropy(&data);
        assert!((entropy - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_entropy_empty() {
        assert_eq!(calculate_entropy(&[]), 0.0);
    }

    #[test]
    fn test_extract_ascii() {
        let data = b"Hello World\x00\xff\xfe";
        assert_eq!(extract_ascii(data), Some("Hello World".to_string()));
    }

    #[test]
    fn test_extract_ascii_skips_short_runs() {
        // Runs of 4 or fewer printable bytes are noise, not strings.
        let data = b"abcd\x00efghijk\x01";
        assert_eq!(extract_ascii(data), Some("efghijk".to_string()));
        assert_eq!(extract_ascii(b"ab\x00cd\x00ef"), None);
        assert_eq!(extract_ascii(&[]), None);
    }
}
