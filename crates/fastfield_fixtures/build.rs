fn main() {
    if let Err(err) = fastfield::Builder::new("src").generate() {
        panic!("accessor generation failed: {err}");
    }
}
