//! Product title patterns used to synthesize training sentences.

/// Marker replaced by the product code.
pub const PLACEHOLDER: &str = "{}";

/// Title patterns mixing brand names, categories and generic descriptors.
pub const TEMPLATES: [&str; 17] = [
    "{} スニーカー メンズ レディース 人気モデル",
    "NIKE {} AIR FORCE 1 ナイキ エアフォース ワン",
    "adidas {} スーパースター アディダス 定番モデル",
    "New Balance {} ニューバランス ランニングシューズ",
    "CONVERSE {} オールスター コンバース ハイカット",
    "PUMA {} プーマ スポーツシューズ",
    "Reebok {} リーボック トレーニングシューズ",
    "THE NORTH FACE {} ノースフェイス ジャケット メンズ",
    "UNIQLO {} ユニクロ シャツ 長袖 メンズ",
    "GU {} レディース ワンピース 春 夏 新作",
    "{} Tシャツ 半袖 綿100%",
    "{} バッグ トート レディース ブランド 人気",
    "{} キャップ 帽子 メンズ レディース",
    "型番 {} スニーカー 靴 送料無料",
    "品番 {} デニム パンツ ジーンズ",
    "{} ベルト メンズ ビジネス 本革",
    "商品コード {} リュック 通勤 通学",
];

/// Substitute `code` into `template`.
pub fn render(template: &str, code: &str) -> String {
    template.replacen(PLACEHOLDER, code, 1)
}

/// `template` with the placeholder dropped, as a title carrying no code.
pub fn render_without_code(template: &str) -> String {
    template
        .replacen(PLACEHOLDER, "", 1)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_template_has_one_placeholder() {
        for template in TEMPLATES {
            assert_eq!(template.matches(PLACEHOLDER).count(), 1, "{}", template);
        }
    }

    #[test]
    fn test_render() {
        assert_eq!(
            render("型番 {} スニーカー 靴 送料無料", "AB1234"),
            "型番 AB1234 スニーカー 靴 送料無料"
        );
    }

    #[test]
    fn test_render_without_code() {
        assert_eq!(
            render_without_code("Reebok {} リーボック トレーニングシューズ"),
            "Reebok リーボック トレーニングシューズ"
        );
        assert_eq!(render_without_code("{} Tシャツ 半袖 綿100%"), "Tシャツ 半袖 綿100%");
    }
}
