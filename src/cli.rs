use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use wms_qr_common::export::ErrorCorrection;
use wms_qr_common::{FormField, SingleForm};

#[derive(Parser)]
#[command(name = "wms-qr")]
#[command(about = "入荷レコードQRコード生成ツール（単票・一括）", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 1件分の入力からQRコードを生成（余白付きPNG）
    Single {
        #[command(flatten)]
        form: FormArgs,

        /// 対話形式で入力
        #[arg(short, long)]
        interactive: bool,

        /// 出力ファイル/ディレクトリ（デフォルト: 出力先/barcode.png）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// ペイロード(JSON)を表示
        #[arg(long)]
        print_payload: bool,
    },

    /// Excel/CSVから発注番号ごとにQRコードを一括生成
    Bulk {
        /// 入力ファイル (.xlsx/.xls/.csv)
        file: Option<PathBuf>,

        /// 出力方法 (zip/each/none)
        #[arg(short, long, default_value = "zip")]
        mode: BulkMode,

        /// 指定したレコード番号(1始まり)だけを出力
        #[arg(short, long)]
        record: Option<usize>,

        /// 出力ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 各レコードのペイロード(JSON)を表示
        #[arg(long)]
        print_payload: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 出力先ディレクトリを設定
        #[arg(long)]
        set_output_dir: Option<PathBuf>,

        /// 単票QRのサイズ(px)
        #[arg(long)]
        set_qr_size: Option<u32>,

        /// 一括QRのサイズ(px)
        #[arg(long)]
        set_bulk_qr_size: Option<u32>,

        /// 単票ダウンロードの余白(px)
        #[arg(long)]
        set_margin: Option<u32>,

        /// 余白の色 (#rrggbb)
        #[arg(long)]
        set_margin_color: Option<String>,

        /// 誤り訂正レベル (L/M/Q/H)
        #[arg(long)]
        set_error_correction: Option<ErrorCorrection>,
    },
}

/// 単票フォームの各項目
#[derive(Args, Debug, Clone, Default)]
pub struct FormArgs {
    /// 発注番号 (PONumber) *
    #[arg(long)]
    pub po_number: Option<String>,

    /// 入荷番号 (ReceivingNo) *
    #[arg(long)]
    pub receiving_no: Option<String>,

    /// 仕入先 (Supplier) *
    #[arg(long)]
    pub supplier: Option<String>,

    /// 品番 (ItemNo) *
    #[arg(long)]
    pub item_no: Option<String>,

    /// 品名 (Description) *
    #[arg(long)]
    pub description: Option<String>,

    /// 数量 (Quantity) *
    #[arg(long)]
    pub quantity: Option<String>,

    /// シリアル番号 (SerialNumber)
    #[arg(long)]
    pub serial_number: Option<String>,

    /// 請求書番号 (InvoiceNo) *
    #[arg(long)]
    pub invoice_no: Option<String>,

    /// 保管場所 (Location)
    #[arg(long)]
    pub location: Option<String>,

    /// 入荷日 (ReceivingDate, yyyy-mm-dd)
    #[arg(long)]
    pub receiving_date: Option<String>,

    /// 金額 (Amount)
    #[arg(long)]
    pub amount: Option<String>,
}

impl FormArgs {
    fn value(&self, field: FormField) -> Option<&String> {
        match field {
            FormField::PoNumber => self.po_number.as_ref(),
            FormField::ReceivingNo => self.receiving_no.as_ref(),
            FormField::Supplier => self.supplier.as_ref(),
            FormField::ItemNo => self.item_no.as_ref(),
            FormField::Description => self.description.as_ref(),
            FormField::Quantity => self.quantity.as_ref(),
            FormField::SerialNumber => self.serial_number.as_ref(),
            FormField::InvoiceNo => self.invoice_no.as_ref(),
            FormField::Location => self.location.as_ref(),
            FormField::ReceivingDate => self.receiving_date.as_ref(),
            FormField::Amount => self.amount.as_ref(),
        }
    }

    /// 指定された項目だけフォームに反映
    pub fn apply_to(&self, form: &mut SingleForm) {
        for field in FormField::ALL {
            if let Some(value) = self.value(field) {
                form.set(field, value.clone());
            }
        }
    }
}

/// 一括出力の方法
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BulkMode {
    /// barcodes.zip にまとめる
    #[default]
    Zip,
    /// barcode-<n>.png を個別に保存
    Each,
    /// 一覧表示のみ
    None,
}

impl std::str::FromStr for BulkMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "zip" => Ok(BulkMode::Zip),
            "each" | "png" => Ok(BulkMode::Each),
            "none" | "list" => Ok(BulkMode::None),
            _ => Err(format!("Unknown mode: {}. Use zip, each, or none", s)),
        }
    }
}

impl std::fmt::Display for BulkMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BulkMode::Zip => write!(f, "zip"),
            BulkMode::Each => write!(f, "each"),
            BulkMode::None => write!(f, "none"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_bulk_mode_from_str() {
        assert_eq!("zip".parse::<BulkMode>().unwrap(), BulkMode::Zip);
        assert_eq!("EACH".parse::<BulkMode>().unwrap(), BulkMode::Each);
        assert_eq!("list".parse::<BulkMode>().unwrap(), BulkMode::None);
        assert!("pdf".parse::<BulkMode>().is_err());
    }

    #[test]
    fn test_form_args_apply_only_given_fields() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut form = SingleForm::new(today);
        let args = FormArgs {
            po_number: Some("PO-1".into()),
            quantity: Some("3".into()),
            ..Default::default()
        };
        args.apply_to(&mut form);

        assert_eq!(form.po_number, "PO-1");
        assert_eq!(form.quantity, "3");
        assert_eq!(form.supplier, "");
        assert_eq!(form.receiving_date, "2024-06-01");
    }

    #[test]
    fn test_cli_parses_bulk() {
        let cli = Cli::try_parse_from(["wms-qr", "bulk", "po.xlsx", "--mode", "each", "-r", "2"]).unwrap();
        match cli.command {
            Commands::Bulk { file, mode, record, .. } => {
                assert_eq!(file, Some(PathBuf::from("po.xlsx")));
                assert_eq!(mode, BulkMode::Each);
                assert_eq!(record, Some(2));
            }
            _ => panic!("bulk expected"),
        }
    }

    #[test]
    fn test_cli_parses_single_flags() {
        let cli = Cli::try_parse_from([
            "wms-qr",
            "single",
            "--po-number",
            "PO-9",
            "--receiving-date",
            "2024-01-05",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Single { form, interactive, .. } => {
                assert_eq!(form.po_number.as_deref(), Some("PO-9"));
                assert_eq!(form.receiving_date.as_deref(), Some("2024-01-05"));
                assert!(!interactive);
            }
            _ => panic!("single expected"),
        }
    }
}
