#![no_main]

use alpaca_http11::ByteView;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let data = &data[..data.len().min(ByteView::MAX_SIZE)];
    let view = ByteView::new(data);

    // 数値パースは panic しない
    let _ = view.to_u32();
    let _ = view.to_f64();
    let _ = view.to_bool();

    // to_u32 が成功するのは ASCII 数字のみのとき
    if let Some(value) = view.to_u32() {
        assert!(data.iter().all(|b| b.is_ascii_digit()));
        assert_eq!(
            std::str::from_utf8(data).unwrap().parse::<u32>().unwrap(),
            value
        );
    }

    // span 抽出と prefix 消費
    let mut view = ByteView::new(data);
    if let Some(token) = view.split_matching_prefix(|b| b.is_ascii_alphanumeric()) {
        assert!(token.len() + view.len() == data.len());
        assert!(token.as_slice().iter().all(|b| b.is_ascii_alphanumeric()));
        assert!(!view.is_empty());
    } else {
        assert_eq!(view.len(), data.len());
    }

    let mut view = ByteView::new(data);
    view.remove_prefix(1);
    view.remove_suffix(1);
    let _ = view.contains_str(b"application/json");
});
