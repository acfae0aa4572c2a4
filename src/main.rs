use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use menu_lens::{cache, cli, config, encode, error, gemini, report, scanner};
use menu_lens_common::{MenuItem, TARGET_LANGUAGES};

use cli::{Cli, Commands};
use config::Config;
use error::Result;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze {
            path,
            language,
            output,
            use_cache,
            profile,
        } => {
            println!("📸 menu-lens - メニュー解析\n");

            // 1. 画像収集
            println!("[1/3] 写真を収集中...");
            let images = if path.is_dir() {
                scanner::scan_folder(&path)?
            } else {
                vec![scanner::single_image(&path)?]
            };
            println!("✔ {}枚の写真を検出\n", images.len());

            if images.is_empty() {
                return Err(error::MenuLensError::NoImagesFound(
                    path.display().to_string(),
                ));
            }

            // 2. 翻訳先言語
            let language = match language {
                Some(l) => l,
                None => select_language(&config.default_language)?,
            };

            // 3. 解析
            println!(
                "[2/3] AI解析中...{}",
                if use_cache { " (キャッシュ有効)" } else { "" }
            );
            let api_key = config.get_api_key()?;
            let client =
                gemini::GeminiClient::new(api_key, config.model.clone(), config.timeout_seconds)?;

            let base_dir = if path.is_dir() {
                path.clone()
            } else {
                path.parent()
                    .map(|p| p.to_path_buf())
                    .unwrap_or_else(|| PathBuf::from("."))
            };
            let mut cache_file = if use_cache {
                cache::CacheFile::load(&base_dir)
            } else {
                cache::CacheFile::default()
            };

            let (cached_results, uncached) =
                cache::filter_cached_images(&images, &cache_file, &language);
            if use_cache && !cached_results.is_empty() {
                println!("  キャッシュヒット: {}枚", cached_results.len());
            }

            let mut results: Vec<(String, Vec<MenuItem>)> = cached_results;

            if !uncached.is_empty() {
                // 先に縮小とエンコードを並列で済ませてからAPIを順に呼ぶ
                let to_encode: Vec<scanner::ImageInfo> =
                    uncached.iter().map(|(img, _)| img.clone()).collect();
                let encoded = encode::encode_images(&to_encode, config.max_image_size);

                let progress = ProgressBar::new(uncached.len() as u64);
                progress.set_style(
                    ProgressStyle::with_template("  {bar:30} {pos}/{len} {msg}").unwrap(),
                );

                for ((img, hash), (_, encoded_result)) in uncached.iter().zip(encoded.iter()) {
                    progress.set_message(img.file_name.clone());

                    let image_base64 = match encoded_result {
                        Ok(data) => data,
                        Err(e) => {
                            progress.println(format!("  ✖ {}: {}", img.file_name, e));
                            progress.inc(1);
                            continue;
                        }
                    };

                    match client.analyze_menu(image_base64, &language).await {
                        Ok(items) => {
                            if cli.verbose {
                                progress
                                    .println(format!("  ✔ {}: {}品", img.file_name, items.len()));
                            }
                            if !hash.is_empty() {
                                let file_size =
                                    std::fs::metadata(&img.path).map(|m| m.len()).unwrap_or(0);
                                cache_file.insert(
                                    hash.clone(),
                                    img.file_name.clone(),
                                    file_size,
                                    language.clone(),
                                    items.clone(),
                                );
                            }
                            results.push((img.file_name.clone(), items));
                        }
                        Err(e) => {
                            progress.println(format!("  ✖ {}: {}", img.file_name, e));
                        }
                    }
                    progress.inc(1);
                }
                progress.finish_and_clear();
            }

            if use_cache {
                cache_file.save(&base_dir)?;
            }
            println!("✔ 解析完了\n");

            // 4. 表示と保存
            let profile = profile.any().then(|| profile.to_profile());
            let all_items: Vec<MenuItem> = results
                .iter()
                .flat_map(|(_, items)| items.clone())
                .collect();

            println!("[3/3] 結果\n");
            println!(
                "解析日時: {}  翻訳先: {}\n",
                chrono::Local::now().format("%Y-%m-%d %H:%M"),
                language
            );
            for (file_name, items) in &results {
                report::print_results(file_name, items, profile.as_ref());
            }
            report::print_summary(&all_items, profile.as_ref());

            let output = output.unwrap_or_else(|| base_dir.join("menu.json"));
            let json = serde_json::to_string_pretty(&all_items)?;
            std::fs::write(&output, json)?;
            println!("\n✔ 結果を保存: {}", output.display());

            println!("\n✅ 解析完了");
        }

        Commands::Check { input, profile } => {
            println!("🥗 menu-lens - 食事適合チェック\n");

            let content = std::fs::read_to_string(&input)?;
            let items: Vec<MenuItem> = serde_json::from_str(&content)?;
            let profile = profile.to_profile();

            let label = input
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| input.display().to_string());
            report::print_results(&label, &items, Some(&profile));
            report::print_summary(&items, Some(&profile));
        }

        Commands::Config { set_api_key, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if show {
                println!("設定:");
                println!("  モデル: {}", config.model);
                println!("  既定の翻訳先: {}", config.default_language);
                println!("  最大画像サイズ: {}px", config.max_image_size);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!(
                    "  APIキー: {}",
                    if config.api_key.is_some() {
                        "設定済み"
                    } else {
                        "未設定"
                    }
                );
            }
        }
    }

    Ok(())
}

/// 翻訳先言語の対話選択
fn select_language(default: &str) -> Result<String> {
    let labels: Vec<String> = TARGET_LANGUAGES
        .iter()
        .map(|(code, flag)| format!("{} {}", flag, code))
        .collect();
    let default_index = TARGET_LANGUAGES
        .iter()
        .position(|(code, _)| *code == default)
        .unwrap_or(0);

    let selection = dialoguer::Select::new()
        .with_prompt("翻訳先言語を選択")
        .items(&labels)
        .default(default_index)
        .interact()
        .map_err(|e| error::MenuLensError::Config(format!("言語選択に失敗: {}", e)))?;

    Ok(TARGET_LANGUAGES[selection].0.to_string())
}
