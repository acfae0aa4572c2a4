//! 食事適合判定
//!
//! MenuItemと食事プロファイルから安全判定と違反理由を導出する純粋関数。
//! 判定は副作用なし・I/Oなしで、結果は保存もキャッシュもしない。

use crate::types::{DietaryProfile, MenuItem};
use std::fmt;

/// 食事適合ラベル（閉集合）
///
/// MenuItemの`dietary`はAI出力由来の自由文字列だが、プロンプト側で
/// この集合に制約し、判定側もこの表記との完全一致のみを見る。
/// 大文字小文字の正規化はしない（"vegan"は一致しない）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DietaryLabel {
    Vegetarian,
    Vegan,
    GlutenFree,
}

impl DietaryLabel {
    pub const ALL: &'static [DietaryLabel] = &[
        DietaryLabel::Vegetarian,
        DietaryLabel::Vegan,
        DietaryLabel::GlutenFree,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DietaryLabel::Vegetarian => "Vegetarian",
            DietaryLabel::Vegan => "Vegan",
            DietaryLabel::GlutenFree => "Gluten-Free",
        }
    }
}

/// アレルゲンラベル（閉集合、小文字表記）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllergenLabel {
    Nuts,
    Dairy,
    Gluten,
    Eggs,
    Shellfish,
    Soy,
}

impl AllergenLabel {
    pub const ALL: &'static [AllergenLabel] = &[
        AllergenLabel::Nuts,
        AllergenLabel::Dairy,
        AllergenLabel::Gluten,
        AllergenLabel::Eggs,
        AllergenLabel::Shellfish,
        AllergenLabel::Soy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AllergenLabel::Nuts => "nuts",
            AllergenLabel::Dairy => "dairy",
            AllergenLabel::Gluten => "gluten",
            AllergenLabel::Eggs => "eggs",
            AllergenLabel::Shellfish => "shellfish",
            AllergenLabel::Soy => "soy",
        }
    }
}

/// 違反理由（表示順はこの列挙順で固定）
///
/// UIは先頭の1件を見出し警告として表示するため、順序は判定順そのもの。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    NotVegetarian,
    NotVegan,
    ContainsGluten,
    ContainsNuts,
    ContainsDairy,
}

impl Violation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Violation::NotVegetarian => "Not Vegetarian",
            Violation::NotVegan => "Not Vegan",
            Violation::ContainsGluten => "Contains Gluten",
            Violation::ContainsNuts => "Contains Nuts",
            Violation::ContainsDairy => "Contains Dairy",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 1品に対する判定結果（導出値。保存しない）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompatibilityVerdict {
    pub is_safe: bool,
    pub violations: Vec<Violation>,
}

impl CompatibilityVerdict {
    /// 見出しに出す違反（先頭の1件）
    pub fn headline(&self) -> Option<&'static str> {
        self.violations.first().map(|v| v.as_str())
    }
}

/// 食事プロファイルとの適合を判定
///
/// 5つのチェックを固定順で全て評価し、違反を収集する（短絡しない）。
/// ラベルが単に欠けている場合も違反側に倒す（安全側）。
pub fn evaluate(item: &MenuItem, profile: &DietaryProfile) -> CompatibilityVerdict {
    let has_dietary = |label: DietaryLabel| item.dietary.iter().any(|d| d == label.as_str());
    let has_allergen = |label: AllergenLabel| item.allergens.iter().any(|a| a == label.as_str());

    let mut violations = Vec::new();

    if profile.is_vegetarian
        && !has_dietary(DietaryLabel::Vegetarian)
        && !has_dietary(DietaryLabel::Vegan)
    {
        violations.push(Violation::NotVegetarian);
    }
    if profile.is_vegan && !has_dietary(DietaryLabel::Vegan) {
        violations.push(Violation::NotVegan);
    }
    if profile.is_gluten_free && !has_dietary(DietaryLabel::GlutenFree) {
        violations.push(Violation::ContainsGluten);
    }
    if profile.has_nut_allergy && has_allergen(AllergenLabel::Nuts) {
        violations.push(Violation::ContainsNuts);
    }
    if profile.has_dairy_allergy && has_allergen(AllergenLabel::Dairy) {
        violations.push(Violation::ContainsDairy);
    }

    CompatibilityVerdict {
        is_safe: violations.is_empty(),
        violations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(dietary: &[&str], allergens: &[&str]) -> MenuItem {
        MenuItem {
            original: "Test Dish".to_string(),
            dietary: dietary.iter().map(|s| s.to_string()).collect(),
            allergens: allergens.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    // =============================================
    // 具体ケース
    // =============================================

    #[test]
    fn test_vegan_profile_vegetarian_only_dish() {
        let profile = DietaryProfile {
            is_vegan: true,
            ..Default::default()
        };
        let verdict = evaluate(&item(&["Vegetarian"], &[]), &profile);

        assert!(!verdict.is_safe);
        assert_eq!(verdict.violations, vec![Violation::NotVegan]);
    }

    #[test]
    fn test_nut_and_dairy_allergy_order() {
        // 違反は固定順（Nuts→Dairy）で並ぶ
        let profile = DietaryProfile {
            has_nut_allergy: true,
            has_dairy_allergy: true,
            ..Default::default()
        };
        let verdict = evaluate(&item(&[], &["nuts", "dairy"]), &profile);

        assert_eq!(
            verdict.violations,
            vec![Violation::ContainsNuts, Violation::ContainsDairy]
        );
        assert_eq!(verdict.headline(), Some("Contains Nuts"));
    }

    #[test]
    fn test_empty_profile_always_safe() {
        let profile = DietaryProfile::default();
        let verdict = evaluate(&item(&[], &["nuts", "dairy", "gluten"]), &profile);

        assert!(verdict.is_safe);
        assert!(verdict.violations.is_empty());
    }

    // =============================================
    // 判定順・収集
    // =============================================

    #[test]
    fn test_all_violations_collected() {
        // 全フラグON・何も満たさない品 → 5件すべて固定順で収集
        let profile = DietaryProfile {
            is_vegetarian: true,
            is_vegan: true,
            is_gluten_free: true,
            has_nut_allergy: true,
            has_dairy_allergy: true,
        };
        let verdict = evaluate(&item(&[], &["nuts", "dairy"]), &profile);

        assert_eq!(
            verdict.violations,
            vec![
                Violation::NotVegetarian,
                Violation::NotVegan,
                Violation::ContainsGluten,
                Violation::ContainsNuts,
                Violation::ContainsDairy,
            ]
        );
    }

    #[test]
    fn test_vegan_label_satisfies_vegetarian() {
        let profile = DietaryProfile {
            is_vegetarian: true,
            ..Default::default()
        };
        let verdict = evaluate(&item(&["Vegan"], &[]), &profile);

        assert!(verdict.is_safe);
    }

    #[test]
    fn test_is_safe_iff_no_violations() {
        let profile = DietaryProfile {
            is_gluten_free: true,
            ..Default::default()
        };

        let safe = evaluate(&item(&["Gluten-Free"], &[]), &profile);
        assert!(safe.is_safe);
        assert!(safe.violations.is_empty());

        let unsafe_ = evaluate(&item(&[], &[]), &profile);
        assert!(!unsafe_.is_safe);
        assert!(!unsafe_.violations.is_empty());
    }

    // =============================================
    // 境界ケース
    // =============================================

    #[test]
    fn test_case_sensitive_matching() {
        // 表記ゆれは正規化しない。"vegan"は"Vegan"と一致しない
        let profile = DietaryProfile {
            is_vegan: true,
            ..Default::default()
        };
        let verdict = evaluate(&item(&["vegan"], &[]), &profile);

        assert!(!verdict.is_safe);
        assert_eq!(verdict.violations, vec![Violation::NotVegan]);
    }

    #[test]
    fn test_unknown_labels_ignored() {
        // 未知のラベルは「存在しない」扱い
        let profile = DietaryProfile {
            has_nut_allergy: true,
            ..Default::default()
        };
        let verdict = evaluate(&item(&["Keto"], &["peanut butter"]), &profile);

        // "peanut butter"は"nuts"ではないので違反なし（安全側に倒すのは
        // 要求ラベル欠落時のみで、アレルゲンは明示一致のみ）
        assert!(verdict.is_safe);
    }

    #[test]
    fn test_missing_dietary_fails_safe() {
        // dietaryが空のままなら要求側はすべて違反扱い
        let profile = DietaryProfile {
            is_vegetarian: true,
            is_gluten_free: true,
            ..Default::default()
        };
        let verdict = evaluate(&item(&[], &[]), &profile);

        assert_eq!(
            verdict.violations,
            vec![Violation::NotVegetarian, Violation::ContainsGluten]
        );
    }

    #[test]
    fn test_violation_display_strings() {
        assert_eq!(Violation::NotVegetarian.to_string(), "Not Vegetarian");
        assert_eq!(Violation::NotVegan.to_string(), "Not Vegan");
        assert_eq!(Violation::ContainsGluten.to_string(), "Contains Gluten");
        assert_eq!(Violation::ContainsNuts.to_string(), "Contains Nuts");
        assert_eq!(Violation::ContainsDairy.to_string(), "Contains Dairy");
    }

    #[test]
    fn test_label_vocabulary() {
        assert_eq!(DietaryLabel::ALL.len(), 3);
        assert_eq!(DietaryLabel::GlutenFree.as_str(), "Gluten-Free");
        assert!(AllergenLabel::ALL.contains(&AllergenLabel::Shellfish));
        assert_eq!(AllergenLabel::Nuts.as_str(), "nuts");
    }
}
