//! ByteView のプロパティテスト

use alpaca_http11::ByteView;
use proptest::prelude::*;

proptest! {
    /// to_u32 は str::parse::<u32> と一致する
    #[test]
    fn to_u32_matches_std_parse(digits in "[0-9]{1,12}") {
        let view = ByteView::new(digits.as_bytes());
        prop_assert_eq!(view.to_u32(), digits.parse::<u32>().ok());
    }
}

proptest! {
    /// 数字以外を含む入力は常に None
    #[test]
    fn to_u32_rejects_non_digits(text in "[0-9]{0,4}[^0-9][0-9a-zA-Z]{0,4}") {
        let bytes = text.as_bytes();
        prop_assume!(bytes.len() <= ByteView::MAX_SIZE);
        prop_assert_eq!(ByteView::new(bytes).to_u32(), None);
    }
}

proptest! {
    /// to_bool は true/false リテラルの大文字小文字無視の照合
    #[test]
    fn to_bool_matches_literals(text in "[a-zA-Z]{1,8}") {
        let view = ByteView::new(text.as_bytes());
        let expected = if text.eq_ignore_ascii_case("true") {
            Some(true)
        } else if text.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        };
        prop_assert_eq!(view.to_bool(), expected);
    }
}

proptest! {
    /// eq_ignore_ascii_case は str の実装と一致する
    #[test]
    fn case_insensitive_eq_matches_std(a in "[ -~]{0,16}", b in "[ -~]{0,16}") {
        let view = ByteView::new(a.as_bytes());
        prop_assert_eq!(
            view.eq_ignore_ascii_case(b.as_bytes()),
            a.eq_ignore_ascii_case(&b)
        );
    }
}

proptest! {
    /// match_and_consume は一致したときだけ前進する
    #[test]
    fn match_and_consume_is_prefix_exact(
        prefix in proptest::collection::vec(any::<u8>(), 0..16),
        rest in proptest::collection::vec(any::<u8>(), 0..16),
    ) {
        let mut data = prefix.clone();
        data.extend_from_slice(&rest);
        let mut view = ByteView::new(&data);
        prop_assert!(view.match_and_consume(&prefix));
        prop_assert_eq!(view.as_slice(), rest.as_slice());
    }
}

proptest! {
    /// split_matching_prefix は述語境界で正確に分割する
    #[test]
    fn split_matching_prefix_boundary(
        digits in "[0-9]{0,12}",
        rest in "[a-z][a-z0-9]{0,8}",
    ) {
        let data = format!("{digits}{rest}");
        let mut view = ByteView::new(data.as_bytes());
        let token = view.split_matching_prefix(|b| b.is_ascii_digit()).unwrap();
        prop_assert_eq!(token.as_slice(), digits.as_bytes());
        prop_assert_eq!(view.as_slice(), rest.as_bytes());
    }
}

proptest! {
    /// 全バイトが述語を満たす場合は消費しない
    #[test]
    fn split_matching_prefix_without_terminator(digits in "[0-9]{0,32}") {
        let mut view = ByteView::new(digits.as_bytes());
        prop_assert!(view.split_matching_prefix(|b| b.is_ascii_digit()).is_none());
        prop_assert_eq!(view.len(), digits.len());
    }
}

proptest! {
    /// remove_prefix / remove_suffix は残量を超えても panic しない
    #[test]
    fn remove_prefix_suffix_saturate(
        data in proptest::collection::vec(any::<u8>(), 0..32),
        n in 0usize..64,
    ) {
        let mut view = ByteView::new(&data);
        view.remove_prefix(n);
        prop_assert_eq!(view.len(), data.len().saturating_sub(n));

        let mut view = ByteView::new(&data);
        view.remove_suffix(n);
        prop_assert_eq!(view.len(), data.len().saturating_sub(n));
    }
}

proptest! {
    /// contains_str は windows による単純な検索と一致する
    #[test]
    fn contains_str_matches_naive_search(
        haystack in proptest::collection::vec(any::<u8>(), 0..48),
        needle in proptest::collection::vec(any::<u8>(), 1..8),
    ) {
        let view = ByteView::new(&haystack);
        let expected = haystack.windows(needle.len()).any(|w| w == needle.as_slice());
        prop_assert_eq!(view.contains_str(&needle), expected);
    }
}
