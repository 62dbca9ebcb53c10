//! Small utility helpers used across modules.

/// Render a second count as `M:SS` (minutes are not wrapped into hours).
pub fn format_clock(seconds: u32) -> String {
  format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Log-safe truncation for client payloads.
/// Cuts on a char boundary so multi-byte input never panics.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut end = max;
  while !s.is_char_boundary(end) {
    end -= 1;
  }
  format!("{}… ({} bytes total)", &s[..end], s.len())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn clock_format() {
    assert_eq!(format_clock(0), "0:00");
    assert_eq!(format_clock(9), "0:09");
    assert_eq!(format_clock(75), "1:15");
    assert_eq!(format_clock(600), "10:00");
  }

  #[test]
  fn truncation_respects_char_boundaries() {
    assert_eq!(trunc_for_log("short", 10), "short");
    assert_eq!(trunc_for_log("Côte d'Ivoire", 2), "C… (14 bytes total)");
  }
}
