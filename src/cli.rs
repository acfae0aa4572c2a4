use clap::{Args, Parser, Subcommand};
use menu_lens_common::DietaryProfile;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "menu-lens")]
#[command(about = "メニュー写真AI解析・食事適合判定ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// メニュー写真を解析してJSONを出力
    Analyze {
        /// 写真ファイルまたはフォルダのパス
        #[arg(required = true)]
        path: PathBuf,

        /// 翻訳先言語（未指定なら対話選択）
        #[arg(short, long)]
        language: Option<String>,

        /// 出力JSONファイル（デフォルト: 入力フォルダ/menu.json）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// キャッシュを使用（再解析をスキップ）
        #[arg(long)]
        use_cache: bool,

        #[command(flatten)]
        profile: ProfileFlags,
    },

    /// 解析済みJSONを食事プロファイルで再判定（ネットワーク不要）
    Check {
        /// 入力JSONファイル
        #[arg(required = true)]
        input: PathBuf,

        #[command(flatten)]
        profile: ProfileFlags,
    },

    /// 設定の表示・変更
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// 食事プロファイルフラグ
#[derive(Args, Clone, Copy, Default)]
pub struct ProfileFlags {
    /// ベジタリアン
    #[arg(long)]
    pub vegetarian: bool,

    /// ビーガン
    #[arg(long)]
    pub vegan: bool,

    /// グルテンフリー
    #[arg(long)]
    pub gluten_free: bool,

    /// ナッツアレルギー
    #[arg(long)]
    pub nut_allergy: bool,

    /// 乳製品アレルギー
    #[arg(long)]
    pub dairy_allergy: bool,
}

impl ProfileFlags {
    /// いずれかのフラグが指定されているか
    pub fn any(&self) -> bool {
        self.vegetarian || self.vegan || self.gluten_free || self.nut_allergy || self.dairy_allergy
    }

    pub fn to_profile(&self) -> DietaryProfile {
        DietaryProfile {
            is_vegetarian: self.vegetarian,
            is_vegan: self.vegan,
            is_gluten_free: self.gluten_free,
            has_nut_allergy: self.nut_allergy,
            has_dairy_allergy: self.dairy_allergy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_flags_any() {
        assert!(!ProfileFlags::default().any());

        let flags = ProfileFlags {
            vegan: true,
            ..Default::default()
        };
        assert!(flags.any());
    }

    #[test]
    fn test_profile_flags_to_profile() {
        let flags = ProfileFlags {
            vegetarian: true,
            nut_allergy: true,
            ..Default::default()
        };

        let profile = flags.to_profile();
        assert!(profile.is_vegetarian);
        assert!(profile.has_nut_allergy);
        assert!(!profile.is_vegan);
    }
}
