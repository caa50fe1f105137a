use std::fmt;

#[derive(Clone, Copy, Debug)]
pub struct FileSize(pub u64);

impl fmt::Display for FileSize {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const UNITS: [&str; 3] = ["B", "KB", "MB"];
        if self.0 == 0 {
            return write!(f, "0.0{}", UNITS[0]);
        }

        let bytes = self.0 as f32;
        let i = ((bytes.log10() / 3.0) as usize).min(UNITS.len() - 1);
        write!(f, "{:.1}{}", bytes / 1000.0f32.powi(i as i32), UNITS[i])
    }
}

#[cfg(test)]
mod tests {
    use super::FileSize;

    #[test]
    fn file_size_units() {
        assert_eq!(FileSize(0).to_string(), "0.0B");
        assert_eq!(FileSize(512).to_string(), "512.0B");
        assert_eq!(FileSize(1500).to_string(), "1.5KB");
        assert_eq!(FileSize(2_500_000).to_string(), "2.5MB");
        assert_eq!(FileSize(7_000_000_000).to_string(), "7000.0MB");
    }
}
