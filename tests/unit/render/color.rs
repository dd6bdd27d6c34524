use super::*;

#[test]
fn zero_is_transparent() {
    assert_eq!(decode_color(0), Paint::Transparent);
    assert_eq!(decode_color(0).to_string(), "transparent");
    assert_eq!(decode_color(0).to_rgba8(), [0, 0, 0, 0]);
}

#[test]
fn opaque_alpha_uses_six_hex_digits() {
    let paint = decode_color(0x112233FF);
    assert_eq!(
        paint,
        Paint::Rgb {
            r: 0x11,
            g: 0x22,
            b: 0x33
        }
    );
    assert_eq!(paint.to_string(), "#112233");
    assert_eq!(decode_color(0x000000FF).to_string(), "#000000");
}

#[test]
fn alpha_lives_in_the_low_byte() {
    let paint = decode_color(0x11223380);
    assert_eq!(
        paint,
        Paint::Rgba {
            r: 0x11,
            g: 0x22,
            b: 0x33,
            a: 0x80
        }
    );
    assert!((paint.alpha() - 0.502).abs() < 1e-3);
    assert_eq!(paint.to_string(), format!("rgba(17,34,51,{})", 128.0 / 255.0));
    assert_eq!(paint.to_rgba8(), [0x11, 0x22, 0x33, 0x80]);
}

#[test]
fn colour_with_zero_alpha_is_not_the_sentinel() {
    let paint = decode_color(0xFF000000);
    assert_eq!(paint.to_string(), "rgba(255,0,0,0)");
    assert_eq!(paint.alpha(), 0.0);
}
