#![no_main]

use alpaca_http11::{ByteView, DecodeStatus, RequestDecoder};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, arbitrary::Arbitrary)]
struct Input {
    data: Vec<u8>,
    chunk_size: u8,
}

fuzz_target!(|input: Input| {
    let chunk_size = (input.chunk_size as usize).clamp(1, ByteView::MAX_SIZE);
    let mut decoder = RequestDecoder::new();
    decoder.reset();

    // チャンクごとに投入するストリーミングシナリオ
    let mut buffer: Vec<u8> = Vec::new();
    let mut offset = 0;
    loop {
        while buffer.len() < chunk_size && offset < input.data.len() {
            buffer.push(input.data[offset]);
            offset += 1;
        }
        let at_end = offset == input.data.len();
        let window = buffer.clone();
        let mut view = ByteView::new(&window);
        let status = decoder.decode(&mut view, buffer.len() >= chunk_size, at_end);

        // prefix 消費の不変条件
        assert!(view.len() <= window.len());
        assert_eq!(view.as_slice(), &window[window.len() - view.len()..]);

        let removed = window.len() - view.len();
        buffer.drain(..removed);

        if status != DecodeStatus::NeedMoreInput {
            assert!(status.is_terminal());
            break;
        }
        if at_end && removed == 0 {
            break;
        }
    }

    // リセット後は同じ入力を一括で処理しても panic しない
    decoder.reset();
    let whole = &input.data[..input.data.len().min(ByteView::MAX_SIZE)];
    let mut view = ByteView::new(whole);
    let _ = decoder.decode(&mut view, false, true);
});
