use percent_encoding::percent_decode;

/// Escape HTML special characters
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Path segment for a validated title. Titles only carry letters, digits
/// and spaces, so spaces are the only characters that need encoding.
pub fn title_url_segment(title: &str) -> String {
    title.replace(' ', "%20")
}

/// First value of `name` in an `application/x-www-form-urlencoded` body,
/// decoded to raw bytes. Invalid UTF-8 in the value is kept as is.
pub fn form_field(form: &[u8], name: &str) -> Option<Vec<u8>> {
    form.split(|&b| b == b'&').find_map(|pair| {
        let (key, value) = match pair.iter().position(|&b| b == b'=') {
            Some(i) => (&pair[..i], &pair[i + 1..]),
            None => (pair, &pair[pair.len()..]),
        };
        (decode_form_component(key) == name.as_bytes()).then(|| decode_form_component(value))
    })
}

// '+' is a space only when it appears literally; "%2B" stays a plus.
fn decode_form_component(raw: &[u8]) -> Vec<u8> {
    let spaced: Vec<u8> = raw.iter().map(|&b| if b == b'+' { b' ' } else { b }).collect();
    percent_decode(&spaced).collect()
}
