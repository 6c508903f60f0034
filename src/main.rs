use chrono::Local;
use clap::Parser;
use wms_qr::{cli, config, error, export, form_prompt, import, logging};
use cli::{BulkMode, Cli, Commands};
use config::Config;
use error::{report, Result, WmsQrError};
use wms_qr_common::{bulk_payloads, SingleForm};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("{}", report(&e));
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let config = Config::load()?;
    let today = Local::now().date_naive();

    match cli.command {
        Commands::Single { form: args, interactive, output, print_payload } => {
            println!("🏷  wms-qr - 単票QR生成\n");

            let mut form = SingleForm::new(today);
            args.apply_to(&mut form);
            if interactive {
                form = form_prompt::prompt_form(form)?;
            }

            let missing = form.missing_required();
            if !missing.is_empty() {
                let names: Vec<&str> = missing.iter().map(|f| f.label()).collect();
                return Err(WmsQrError::MissingRequired(names.join(", ")));
            }

            let payload = form.submit(today)?;
            if print_payload {
                println!("{}\n", payload);
            }

            let output = output.unwrap_or_else(|| config.output_dir());
            let path = export::single::save_single(
                &payload,
                &output,
                &config.single_style(),
                &config.margin_style()?,
            )?;
            println!("✔ QRコードを保存: {}", path.display());

            println!("\n✅ 完了");
        }

        Commands::Bulk { file, mode, record, output, print_payload } => {
            println!("📦 wms-qr - 一括QR生成\n");

            // 1. 取込
            println!("[1/2] ファイルを読み込み中...");
            let records = import::load_records(file.as_deref(), today)?;
            println!("✔ {}件のレコードを検出\n", records.len());

            for (i, rec) in records.iter().enumerate() {
                println!("  {}", import::record_summary(i, rec));
            }
            if !records.is_empty() {
                println!();
            }

            if print_payload {
                for payload in bulk_payloads(&records)? {
                    println!("{}", payload);
                }
                println!();
            }

            if records.is_empty() {
                println!("出力するレコードがありません");
                return Ok(());
            }

            // 2. 出力
            let output_dir = output.unwrap_or_else(|| config.output_dir());
            let style = config.bulk_style();

            if let Some(number) = record {
                println!("[2/2] レコード{}を出力中...", number);
                let path = export::bulk::save_record(&records, number, &output_dir, &style)?;
                println!("✔ QRコードを保存: {}", path.display());
            } else if mode == BulkMode::None {
                println!("[2/2] 出力なし (--mode none)");
            } else {
                println!("[2/2] 出力中...");
                export::export_records(&records, mode, &output_dir, style).await?;
            }

            println!("\n✅ 完了");
        }

        Commands::Config {
            show,
            set_output_dir,
            set_qr_size,
            set_bulk_qr_size,
            set_margin,
            set_margin_color,
            set_error_correction,
        } => {
            let mut config = config;
            let mut changed = false;

            if let Some(dir) = set_output_dir {
                config.output_dir = Some(dir);
                changed = true;
            }
            if let Some(size) = set_qr_size {
                config.qr_size = size;
                changed = true;
            }
            if let Some(size) = set_bulk_qr_size {
                config.bulk_qr_size = size;
                changed = true;
            }
            if let Some(margin) = set_margin {
                config.margin = margin;
                changed = true;
            }
            if let Some(color) = set_margin_color {
                config.margin_color = color;
                changed = true;
            }
            if let Some(level) = set_error_correction {
                config.error_correction = level;
                changed = true;
            }

            if changed {
                config.validate()?;
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  単票QRサイズ: {}px", config.qr_size);
                println!("  一括QRサイズ: {}px", config.bulk_qr_size);
                println!("  余白: {}px ({})", config.margin, config.margin_color);
                println!("  誤り訂正レベル: {}", config.error_correction);
                println!("  出力先: {}", config.output_dir().display());
            }
        }
    }

    Ok(())
}
