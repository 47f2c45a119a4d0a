#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sarx::index::SuffixArray;

#[derive(Arbitrary, Debug)]
struct Input {
    text: Vec<u8>,
    i: usize,
    j: usize,
    len: usize,
}

fuzz_target!(|input: Input| {
    let Ok(sa) = SuffixArray::new(&input.text) else {
        return;
    };
    let n = input.text.len();

    // Out-of-range arguments must be rejected, never panic
    let Ok(ordering) = sa.compare(input.i, input.j, input.len) else {
        assert!(input.i >= n || input.j >= n || input.len == 0 || input.len > n);
        return;
    };

    let a = &input.text[input.i..(input.i + input.len).min(n)];
    let b = &input.text[input.j..(input.j + input.len).min(n)];
    assert_eq!(ordering, a.cmp(b));
});
