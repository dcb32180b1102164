// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_tagged_sentence(chunks: usize) -> String {
    (1..=chunks)
        .map(|n| format!("<c{n}>the <v>quick</v> brown fox number {n}</c{n}>"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[allow(dead_code)]
pub fn generate_noisy_sentence(chunks: usize) -> String {
    let mut content = String::from("Leading words ");
    for n in 1..=chunks {
        content.push_str(&format!("<c{n}>some <v>text</v> here</c{n}> stray <v>bits</v> "));
        if n % 5 == 0 {
            content.push_str("<c999>unclosed ");
        }
    }
    content.push_str("trailing words");
    content
}
