#![no_main]

use libfuzzer_sys::fuzz_target;
use sarx::index::SuffixArray;

fuzz_target!(|data: &[u8]| {
    // Build over arbitrary bytes and check the order against direct comparison
    let Ok(sa) = SuffixArray::new(data) else {
        assert!(data.is_empty());
        return;
    };

    let order = sa.order();
    let lcp = sa.lcp();
    assert_eq!(order.len(), data.len());
    assert_eq!(lcp[data.len() - 1], 0);

    for rank in 1..order.len() {
        let prev = &data[order[rank - 1]..];
        let next = &data[order[rank]..];
        assert!(prev < next);

        let shared = prev.iter().zip(next).take_while(|(a, b)| a == b).count();
        assert_eq!(lcp[rank - 1], shared);
    }
});
