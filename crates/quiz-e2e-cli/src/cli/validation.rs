/// Parse a strictly positive millisecond count.
///
/// # Errors
///
/// Returns an error message if the value is not a positive integer.
pub fn parse_millis(s: &str) -> Result<u64, String> {
    let value: u64 = s
        .trim()
        .parse()
        .map_err(|_| format!("Expected a number of milliseconds: '{s}'"))?;
    if value == 0 {
        return Err("Must be greater than zero".to_string());
    }
    Ok(value)
}

/// Parse a window size written as `WIDTHxHEIGHT`.
///
/// # Examples
///
/// Valid: 1920x1080, 800X600
/// Invalid: 1920, 0x600, 1920x, wide
///
/// # Errors
///
/// Returns an error message if either dimension is missing or zero.
pub fn parse_window_size(s: &str) -> Result<(u32, u32), String> {
    let Some((width, height)) = s.split_once(['x', 'X']) else {
        return Err(format!("Expected WIDTHxHEIGHT, e.g. 1920x1080: '{s}'"));
    };

    let parse = |part: &str| -> Result<u32, String> {
        match part.trim().parse::<u32>() {
            Ok(0) => Err(format!("Window dimensions must be non-zero: '{s}'")),
            Ok(value) => Ok(value),
            Err(_) => Err(format!("Expected WIDTHxHEIGHT, e.g. 1920x1080: '{s}'")),
        }
    };

    Ok((parse(width)?, parse(height)?))
}
