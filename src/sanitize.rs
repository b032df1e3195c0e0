// ============================================
// src/sanitize.rs
// API から届いたテキストをプレーンテキストに変換する
// ============================================

use scraper::{ElementRef, Html, Node};

/// 中身ごと捨てるタグ
const SKIP_TAGS: [&str; 4] = ["script", "style", "noscript", "svg"];

/// HTML 断片をプレーンテキストに変換する
///
/// 文字参照 (`&quot;` `&#039;` など) はデコードし、タグは取り除く。
/// 連続する空白は 1 つにまとめ、制御文字 (ESC など) は落とす。
pub fn plain_text(fragment: &str) -> String {
    if !fragment.contains(['&', '<']) {
        return strip_control(&collapse_whitespace(fragment));
    }

    let document = Html::parse_fragment(fragment);
    let mut text = String::with_capacity(fragment.len());
    collect_text(document.root_element(), &mut text);
    strip_control(&collapse_whitespace(&text))
}

/// テキストノードを再帰的に集める (SKIP_TAGS の配下は無視)
fn collect_text(element: ElementRef, out: &mut String) {
    if SKIP_TAGS.contains(&element.value().name()) {
        return;
    }
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_text(child_el, out);
                }
            }
            _ => {}
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 端末のエスケープシーケンスを注入されないようにする
fn strip_control(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_common_entities() {
        assert_eq!(plain_text("&quot;Hi&quot; &amp; bye"), "\"Hi\" & bye");
        assert_eq!(plain_text("It&#039;s"), "It's");
        assert_eq!(plain_text("Pok&eacute;mon"), "Pokémon");
    }

    #[test]
    fn strips_markup() {
        assert_eq!(plain_text("<b>bold</b> move"), "bold move");
        assert_eq!(plain_text("<img src=x onerror=alert(1)>safe"), "safe");
    }

    #[test]
    fn drops_script_and_style_bodies() {
        assert_eq!(plain_text("<script>alert(1)</script>Paris"), "Paris");
        assert_eq!(plain_text("<style>p { color: red }</style>Rome"), "Rome");
        assert_eq!(plain_text("Pok<i>&eacute;</i>mon"), "Pokémon");
    }

    #[test]
    fn drops_terminal_escapes() {
        let decoded = plain_text("&#27;[2JParis");
        assert!(!decoded.contains('\u{1b}'));
        assert_eq!(decoded, "[2JParis");

        let raw = plain_text("\u{1b}[31mParis");
        assert!(!raw.contains('\u{1b}'));
        assert_eq!(raw, "[31mParis");

        assert_eq!(plain_text("Par\u{7}is\u{0}"), "Paris");
    }

    #[test]
    fn leaves_plain_text_alone() {
        assert_eq!(plain_text("  Paris  "), "Paris");
        assert_eq!(plain_text("1 < 2"), "1 < 2");
    }
}
