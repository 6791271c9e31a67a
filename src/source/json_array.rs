// JSON配列のストリーミング読み込み
//
// `[` → 要素 → `,` → 要素 … → `]` の順に1要素ずつ読み進める。
// 配列の構造が壊れている場合はファイル単位で致命的なエラー、
// 構造は正しいが要素がItemとして解釈できない場合はレコードエラーになる。

use super::{Decoded, RecordSource};
use crate::core::{FileError, Item, RecordError, SourceError};
use std::io::{self, BufRead};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// `[` をまだ読んでいない
    Start,
    /// `[` の直後
    First,
    /// 要素の直後（`,` か `]` を待つ）
    Rest,
    /// `]` を読み終えた、または致命的エラーの後
    Done,
}

/// JSON配列の要素を1つずつItemとして返すソース
pub struct JsonArraySource<R> {
    reader: R,
    state: State,
    offset: u64,
    index: usize,
    element: Vec<u8>,
}

impl<R: BufRead> JsonArraySource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            state: State::Start,
            offset: 0,
            index: 0,
            element: Vec::new(),
        }
    }

    /// これまでに消費したバイト数
    pub fn offset(&self) -> u64 {
        self.offset
    }

    fn framing(&self, reason: &str) -> FileError {
        FileError::framing(self.offset, reason)
    }

    fn peek(&mut self) -> Result<Option<u8>, FileError> {
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
                Err(error) => return Err(FileError::read(error)),
            }
        }
    }

    fn bump(&mut self) {
        self.reader.consume(1);
        self.offset += 1;
    }

    fn skip_whitespace(&mut self) -> Result<Option<u8>, FileError> {
        while let Some(byte) = self.peek()? {
            if !is_whitespace(byte) {
                return Ok(Some(byte));
            }
            self.bump();
        }
        Ok(None)
    }

    /// 次の要素を `self.element` に読み込む。配列が閉じたら `false`
    fn advance(&mut self) -> Result<bool, FileError> {
        if self.state == State::Start {
            match self.skip_whitespace()? {
                Some(b'[') => {
                    self.bump();
                    self.state = State::First;
                }
                Some(_) => return Err(self.framing("expected `[` at start of input")),
                None => return Err(self.framing("unexpected end of input, expected `[`")),
            }
        }

        match (self.state, self.skip_whitespace()?) {
            (State::First | State::Rest, Some(b']')) => {
                self.bump();
                self.state = State::Done;
                return Ok(false);
            }
            (State::Rest, Some(b',')) => {
                self.bump();
                match self.skip_whitespace()? {
                    Some(b']') => return Err(self.framing("trailing `,` before `]`")),
                    Some(_) => {}
                    None => return Err(self.framing("unexpected end of input, expected value")),
                }
            }
            (State::Rest, Some(_)) => return Err(self.framing("expected `,` or `]`")),
            (State::First, Some(_)) => {}
            (_, None) => return Err(self.framing("unexpected end of input, expected `]`")),
            (State::Start | State::Done, Some(_)) => return Ok(false),
        }

        self.read_element()?;
        self.state = State::Rest;
        Ok(true)
    }

    /// 要素1つ分の生バイト列を読み込む（文字列とネストを追跡する）
    fn read_element(&mut self) -> Result<(), FileError> {
        self.element.clear();
        let mut depth = 0usize;
        let mut in_string = false;
        let mut escaped = false;

        loop {
            let Some(byte) = self.peek()? else {
                return Err(self.framing("unexpected end of input inside element"));
            };

            if in_string {
                self.take(byte);
                if escaped {
                    escaped = false;
                } else if byte == b'\\' {
                    escaped = true;
                } else if byte == b'"' {
                    in_string = false;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                continue;
            }

            match byte {
                b'"' => {
                    self.take(byte);
                    in_string = true;
                }
                b'{' | b'[' => {
                    self.take(byte);
                    depth += 1;
                }
                b'}' | b']' if depth > 0 => {
                    self.take(byte);
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                // スカラー要素の終端。区切り文字は消費しない
                b',' | b']' | b'}' if depth == 0 => {
                    if self.element.is_empty() {
                        return Err(self.framing("expected value"));
                    }
                    return Ok(());
                }
                _ if depth == 0 && is_whitespace(byte) => return Ok(()),
                _ => self.take(byte),
            }
        }
    }

    fn take(&mut self, byte: u8) {
        self.element.push(byte);
        self.bump();
    }

    fn decode(&mut self) -> Result<Decoded, SourceError> {
        let index = self.index;
        self.index += 1;

        // 不正なUTF-8は U+FFFD に置き換えてから解釈する
        let text = String::from_utf8_lossy(&self.element);
        serde_json::from_str::<Item>(&text)
            .map(Decoded::new)
            .map_err(|error| RecordError::json_element(index, error).into())
    }
}

fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

impl<R: BufRead> Iterator for JsonArraySource<R> {
    type Item = Result<Decoded, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state == State::Done {
            return None;
        }

        match self.advance() {
            Ok(true) => Some(self.decode()),
            Ok(false) => None,
            Err(error) => {
                self.state = State::Done;
                Some(Err(error.into()))
            }
        }
    }
}

impl<R: BufRead> RecordSource for JsonArraySource<R> {}
