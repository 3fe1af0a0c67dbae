use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result, miette};
use rust_decimal::Decimal;
use scanpay::application::controller::PaymentController;
use scanpay::application::scanner::QrScanner;
use scanpay::config::{ApiConfig, DEFAULT_BASE_URL, DEFAULT_PAYMENTS_ENDPOINT};
use scanpay::domain::payment_link::{DEFAULT_LINK_BASE, PaymentLink};
use scanpay::domain::ports::{BarcodeReader, CameraPermissions, ScannerBox};
use scanpay::infrastructure::http::HttpPaymentApi;
use scanpay::infrastructure::in_memory::{FixedPayloadReader, StaticPermissions};
use scanpay::infrastructure::terminal::TerminalCamera;
use scanpay::interfaces::csv::history::CsvTransactionLog;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan a payment QR code and submit it to the payment API
    Scan {
        /// Decoded QR text. When omitted, one line is read from stdin.
        #[arg(long)]
        payload: Option<String>,

        /// Treat camera permission as already granted instead of prompting
        #[arg(long)]
        grant_camera: bool,

        /// CSV file that every submitted attempt is appended to
        #[arg(long)]
        history: Option<PathBuf>,

        #[arg(long, env = "SCANPAY_BASE_URL", default_value = DEFAULT_BASE_URL)]
        base_url: String,

        #[arg(long, env = "SCANPAY_PAYMENTS_ENDPOINT", default_value = DEFAULT_PAYMENTS_ENDPOINT)]
        payments_endpoint: String,
    },
    /// Print the payment URL to encode into a merchant QR code
    Link {
        merchant_id: String,
        amount: Decimal,
        description: String,

        #[arg(long, default_value = DEFAULT_LINK_BASE)]
        base: String,
    },
    /// Print the payment URL as a QR code made of terminal block characters
    Qr {
        merchant_id: String,
        amount: Decimal,
        description: String,

        #[arg(long, default_value = DEFAULT_LINK_BASE)]
        base: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Scan {
            payload,
            grant_camera,
            history,
            base_url,
            payments_endpoint,
        } => {
            let config = ApiConfig::new(base_url, payments_endpoint);
            scan(payload, grant_camera, history, &config).await
        }
        Command::Link {
            merchant_id,
            amount,
            description,
            base,
        } => {
            let link = PaymentLink::new(merchant_id, amount, description).into_diagnostic()?;
            println!("{}", link.to_url(&base));
            Ok(())
        }
        Command::Qr {
            merchant_id,
            amount,
            description,
            base,
        } => {
            let link = PaymentLink::new(merchant_id, amount, description).into_diagnostic()?;
            println!("{}", link.to_qr_text(&base).into_diagnostic()?);
            Ok(())
        }
    }
}

async fn scan(
    payload: Option<String>,
    grant_camera: bool,
    history: Option<PathBuf>,
    config: &ApiConfig,
) -> Result<()> {
    let terminal = Arc::new(TerminalCamera::stdio());

    let permissions: Box<dyn CameraPermissions> = if grant_camera {
        Box::new(StaticPermissions::granted())
    } else {
        Box::new(terminal.clone())
    };
    let reader: Box<dyn BarcodeReader> = match payload {
        Some(payload) => Box::new(FixedPayloadReader::new(payload)),
        None => Box::new(terminal),
    };
    let scanner: ScannerBox = Box::new(QrScanner::new(permissions, reader));

    let mut controller = PaymentController::new(scanner, Box::new(HttpPaymentApi::new(config)));
    if let Some(path) = history {
        controller = controller.with_history(Box::new(CsvTransactionLog::new(path)));
    }

    controller.on_scan_qr_code().await;

    let state = controller.state();
    if state.error_message.is_empty() {
        println!("{}", state.success_message);
        Ok(())
    } else {
        Err(miette!("{}", state.error_message))
    }
}
