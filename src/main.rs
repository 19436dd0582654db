mod cli;

use std::{error::Error, path::PathBuf, sync::Arc};

use anyhow::{anyhow, bail};
use billed::{
    api::ApiStore,
    config::{self, Config},
    containers::{Bills, Context, FileChange, NewBill, Submission},
    model::{Email, User, UserType},
    storage::{self, FileStorage},
    store::ReceiptFile,
    views,
};
use clap::Parser;
use log::debug;

#[derive(Parser)]
#[command(name = env!("CARGO_BIN_NAME"))]
#[command(bin_name = env!("CARGO_BIN_NAME"))]
enum Cli {
    #[command(about = "Prints tool version")]
    #[command(long_about = None)]
    Version,

    #[command(about = "Remember the signed-in user")]
    #[command(long_about = None)]
    SignIn(SignInArgs),

    #[command(about = "List bills, most recent first")]
    #[command(long_about = None)]
    Bills(BillsArgs),

    #[command(about = "Show the receipt of a bill")]
    #[command(long_about = None)]
    Preview(PreviewArgs),

    #[command(about = "Upload a receipt and submit a new bill")]
    #[command(long_about = None)]
    NewBill(NewBillArgs),
}

#[derive(clap::Args)]
struct ConfigArgs {
    #[arg(short='c', long, default_value=Some("./config.toml"))]
    config_path: PathBuf,
}

#[derive(clap::Args)]
struct SignInArgs {
    #[command(flatten)]
    config: ConfigArgs,

    #[arg(long)]
    email: Email,

    #[arg(long = "type", value_enum, ignore_case = true, default_value = "employee")]
    user_type: UserType,

    #[arg(long)]
    jwt: Option<String>,
}

#[derive(clap::Args)]
struct BillsArgs {
    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(clap::Args)]
struct PreviewArgs {
    #[command(flatten)]
    config: ConfigArgs,

    #[arg()]
    id: String,
}

#[derive(clap::Args)]
struct NewBillArgs {
    #[command(flatten)]
    config: ConfigArgs,

    #[arg(short = 'f', long)]
    file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    match Cli::parse() {
        Cli::Version => {
            println!(env!("CARGO_PKG_VERSION"));
        }
        Cli::SignIn(args) => sign_in(args)?,
        Cli::Bills(args) => list_bills(args).await?,
        Cli::Preview(args) => preview(args).await?,
        Cli::NewBill(args) => new_bill(args).await?,
    };

    Ok(())
}

fn load_config(args: &ConfigArgs) -> anyhow::Result<Config> {
    debug!("Подгружаем конфиг из {:?}", args.config_path);
    config::load(args.config_path.clone())
}

fn context(cfg: &Config) -> anyhow::Result<Context> {
    debug!("Подгружаем хранилище из {:?}", cfg.storage_path);
    let local_storage = Arc::new(FileStorage::load(&cfg.storage_path)?);

    let store = ApiStore::new(&cfg.api_url, cfg.timeout(), local_storage.clone())?;

    Ok(Context {
        document: Arc::new(cli::TerminalDocument),
        on_navigate: Arc::new(|path: &str| println!("Переход на {}", path)),
        store: Arc::new(store),
        local_storage,
    })
}

fn sign_in(args: SignInArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.config)?;
    let local_storage = FileStorage::load(&cfg.storage_path)?;

    let user = User {
        user_type: args.user_type,
        email: Some(args.email),
    };

    storage::sign_in(&local_storage, &user, args.jwt.as_deref())?;

    debug!("Пользователь сохранён в {:?}", cfg.storage_path);

    Ok(())
}

async fn list_bills(args: BillsArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.config)?;
    let ctx = context(&cfg)?;

    let mut bills: Vec<_> = Bills::new(&ctx).get_bills().await?.collect();

    views::sort_antichrono(&mut bills);

    print!("{}", views::bills_table(&bills));

    Ok(())
}

async fn preview(args: PreviewArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.config)?;
    let ctx = context(&cfg)?;

    let container = Bills::new(&ctx);

    let bill = container
        .get_bills()
        .await?
        .find(|b| b.bill.id.as_deref() == Some(args.id.as_str()))
        .ok_or(anyhow!("bill {} not found", args.id))?;

    let url = bill
        .bill
        .file_url
        .ok_or(anyhow!("bill {} has no receipt", args.id))?;

    container.handle_click_icon_eye(&url);

    Ok(())
}

async fn new_bill(args: NewBillArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.config)?;
    let ctx = context(&cfg)?;

    let name = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or(anyhow!("{:?} is not a file", args.file))?;

    let content = std::fs::read(&args.file)?;

    let mut container = NewBill::new(&ctx);

    match container
        .handle_change_file(ReceiptFile::new(name, content))
        .await
    {
        FileChange::Uploaded => {}
        FileChange::Rejected => bail!("receipt {:?} rejected", args.file),
        FileChange::UploadFailed => bail!("receipt {:?} upload failed", args.file),
        FileChange::Ignored => bail!("bill is already submitted"),
    }

    let form = cli::ask_form()?;

    match container.handle_submit(&form).await {
        Submission::Submitted => Ok(()),
        Submission::Blocked => bail!("bill can't be submitted without a receipt"),
        Submission::Failed => bail!("bill submission failed"),
    }
}
