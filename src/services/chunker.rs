use std::num::NonZeroUsize;

use crate::models::Chunk;

/// 按字符数切分文本
///
/// 分块按顺序首尾相接、互不重叠，最后一块可能更短；空文本返回空列表
pub fn split_into_chunks(text: &str, chunk_size: NonZeroUsize) -> Vec<Chunk<'_>> {
    let mut bounds: Vec<usize> = text
        .char_indices()
        .map(|(offset, _)| offset)
        .step_by(chunk_size.get())
        .collect();
    let total = bounds.len();
    bounds.push(text.len());

    bounds
        .windows(2)
        .enumerate()
        .map(|(i, w)| Chunk {
            index: i + 1,
            total,
            text: &text[w[0]..w[1]],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_empty_text_has_no_chunks() {
        assert!(split_into_chunks("", size(10)).is_empty());
    }

    #[test]
    fn test_last_chunk_is_shorter() {
        let chunks = split_into_chunks("abcdefghij", size(4));
        let texts: Vec<&str> = chunks.iter().map(|c| c.text).collect();
        assert_eq!(texts, vec!["abcd", "efgh", "ij"]);
        assert!(chunks.iter().all(|c| c.total == 3));
        assert_eq!(
            chunks.iter().map(|c| c.index).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_chunks_partition_text() {
        let samples = [
            "a",
            "exactly8",
            "The quick brown fox jumps over the lazy dog.",
            "Résumé, naïve café, 连贯性与新颖性评估 ✓✓✓",
        ];

        for text in samples {
            let len = text.chars().count();
            for n in 1..=len + 2 {
                let chunks = split_into_chunks(text, size(n));
                assert_eq!(chunks.len(), len.div_ceil(n), "text={text:?} n={n}");
                assert_eq!(chunks.iter().map(|c| c.text).collect::<String>(), text);
                assert!(chunks.iter().all(|c| c.text.chars().count() <= n));
            }
        }
    }
}
