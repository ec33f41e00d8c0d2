//! 文本分块器
//!
//! 将超过合成服务输入上限的长文本切分为有序片段，
//! 按 段落 → 句子 → 单词 三级贪心填充，尽量在自然语言边界处切分。
//!
//! 分块策略：
//! 1. 按空行（连续两个以上换行，允许夹杂其他空白）切分段落
//! 2. 段落内按句末标点（`.` `!` `?`）后跟空白切分句子，标点留在前句
//! 3. 贪心累积句子到当前缓冲，放不下时先落盘再续填
//! 4. 单句超限时退化为按单词贪心填充
//! 5. 段落边界以 `\n\n` 折叠进片段内容，不强制切断

/// 默认最大片段字符数
/// 与合成服务单次请求的输入上限一致
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 4096;

/// 分块配置
#[derive(Debug, Clone)]
pub struct ChunkConfig {
    /// 单个片段的最大字符数
    pub max_chunk_chars: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_chunk_chars: DEFAULT_MAX_CHUNK_CHARS,
        }
    }
}

/// 分块产出的文本片段
///
/// 片段一经产出即不可变，按序号消费
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// 序号（从 1 开始）
    pub index: usize,
    /// 片段内容（非空，已去除首尾空白；整体未超限时原样保留）
    pub text: String,
    /// 字符数
    pub chars: usize,
}

impl Segment {
    fn new(index: usize, text: String) -> Self {
        let chars = text.chars().count();
        Self { index, text, chars }
    }
}

/// 对文本进行分块
///
/// 字符数以 Unicode 标量值计。输出保证：
/// - 空输入产出空序列
/// - 文本整体未超限时产出单个原样片段，不做边界查找
/// - 片段按原文顺序排列，无内容丢失
/// - 除"单词本身超限"这一例外，每个片段字符数不超过上限
/// - 不产出去除空白后为空的片段
///
/// 相同的 `(text, config)` 输入总是产出相同的片段序列
pub fn chunk_text(text: &str, config: &ChunkConfig) -> Vec<Segment> {
    let max_chars = config.max_chunk_chars;

    if text.is_empty() {
        return Vec::new();
    }

    let total_chars = text.chars().count();
    if total_chars <= max_chars {
        return vec![Segment::new(1, text.to_string())];
    }

    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for paragraph in split_paragraphs(text) {
        for sentence in split_sentences(paragraph) {
            let sentence_chars = sentence.chars().count();
            let separator = usize::from(!current.is_empty());

            if current_chars + separator + sentence_chars > max_chars {
                // 放不下，先落盘已累积的内容
                flush(&mut chunks, &mut current);

                if sentence_chars > max_chars {
                    // 单句超限，退化为按单词贪心填充；
                    // 末尾未满的单词缓冲成为新的当前缓冲
                    current_chars = fill_words(sentence, max_chars, &mut chunks, &mut current);
                } else {
                    current.push_str(sentence);
                    current_chars = sentence_chars;
                }
            } else {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(sentence);
                current_chars += separator + sentence_chars;
            }
        }

        // 段落边界折叠进片段内容，让下一片段保留段落换行前缀
        if !current.is_empty() {
            current.push_str("\n\n");
            current_chars += 2;
        }
    }

    flush(&mut chunks, &mut current);

    chunks
        .into_iter()
        .enumerate()
        .map(|(i, chunk)| Segment::new(i + 1, chunk))
        .collect()
}

/// 落盘当前缓冲：去除首尾空白，空内容直接丢弃
fn flush(chunks: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
    current.clear();
}

/// 按单词贪心填充超限的单句
///
/// 满了的单词缓冲依次落盘，最后未满的缓冲写入 `current` 并返回其字符数。
/// 单个单词超限时该片段仍会超限，作为不可避免的边界情况接受
fn fill_words(sentence: &str, max_chars: usize, chunks: &mut Vec<String>, current: &mut String) -> usize {
    let mut buf_chars = 0usize;

    for word in sentence.split_whitespace() {
        let word_chars = word.chars().count();
        let separator = usize::from(!current.is_empty());

        if buf_chars + separator + word_chars > max_chars {
            flush(chunks, current);
            current.push_str(word);
            buf_chars = word_chars;
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            buf_chars += separator + word_chars;
        }
    }

    buf_chars
}

/// 按空行切分段落
///
/// 空行 = 一个换行后跟任意非换行空白，再跟至少一个换行，
/// 整段连续空白视作一个分隔符
fn split_paragraphs(text: &str) -> Vec<&str> {
    let mut paragraphs = Vec::new();
    let mut start = 0usize;
    let mut chars = text.char_indices().peekable();

    while let Some((i, ch)) = chars.next() {
        if ch != '\n' {
            continue;
        }

        // 向后吞掉连续空白，统计其中的换行数
        let mut newline_count = 1;
        let mut separator_end = i + 1;
        while let Some(&(j, next)) = chars.peek() {
            if next == '\n' {
                newline_count += 1;
                separator_end = j + 1;
                chars.next();
            } else if next.is_whitespace() {
                chars.next();
            } else {
                break;
            }
        }

        if newline_count >= 2 {
            paragraphs.push(&text[start..i]);
            start = separator_end;
        }
    }

    paragraphs.push(&text[start..]);
    paragraphs
}

/// 段落内按句子切分
///
/// 句子边界 = 句末标点（`.` `!` `?`）后紧跟空白，标点留在前句，
/// 边界处的整段空白被吞掉
fn split_sentences(paragraph: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let mut after_terminator = false;
    let mut chars = paragraph.char_indices().peekable();

    while let Some((i, ch)) = chars.next() {
        if after_terminator && ch.is_whitespace() {
            sentences.push(&paragraph[start..i]);

            let mut next_start = i + ch.len_utf8();
            while let Some(&(j, next)) = chars.peek() {
                if !next.is_whitespace() {
                    break;
                }
                next_start = j + next.len_utf8();
                chars.next();
            }
            start = next_start;
            after_terminator = false;
            continue;
        }

        after_terminator = matches!(ch, '.' | '!' | '?');
    }

    if start < paragraph.len() {
        sentences.push(&paragraph[start..]);
    }
    sentences
}
