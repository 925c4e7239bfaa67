//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]

use serde_json::Value;

use crate::document::Document;

/// `json!` リテラルから Document を作成する
///
/// # Panics
/// オブジェクト以外が渡された場合
#[allow(clippy::panic)]
pub(crate) fn document(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}
