use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::prelude::*;
use wxarticle::domain::article::{
    Article, ArticleApi, ArticleDetailResult, ArticleListParams, MessageResult, Navigation,
};

#[derive(Parser, Debug)]
#[command(name = "wxarticle")]
#[command(about = "公众号記事APIクライアント", version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    /// 記事一覧を表示
    List {
        /// 0始まりのページ番号
        #[arg(long)]
        page: Option<u32>,
        #[arg(long = "page-size")]
        page_size: Option<u32>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        status: Option<i32>,
        /// 公众号ID
        #[arg(long = "mp-id")]
        mp_id: Option<String>,
        /// 記事本文も取得する
        #[arg(long = "with-content")]
        with_content: bool,
    },
    /// 記事詳細を表示
    Show {
        id: i64,
        /// 前の記事を表示
        #[arg(long, conflicts_with = "next")]
        prev: bool,
        /// 次の記事を表示
        #[arg(long)]
        next: bool,
    },
    /// 記事を削除
    Delete { id: i64 },
    /// 全記事をクリーンアップ
    Clean,
    /// 重複記事をクリーンアップ
    CleanDuplicates,
}

fn init_tracing() {
    // RUST_LOGで上書き可能、デフォルトはwarn
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // 環境変数を読み込み（.envファイルがあれば使用）
    let _ = dotenvy::dotenv();
    init_tracing();

    let args = Args::parse();
    let api = ArticleApi::from_env().context("記事APIクライアントの初期化に失敗")?;

    match args.command {
        Command::List {
            page,
            page_size,
            search,
            status,
            mp_id,
            with_content,
        } => {
            let params = ArticleListParams {
                page,
                page_size,
                search,
                status,
                mp_id,
                has_content: with_content.then_some(true),
            };
            let result = api.list(&params).await.context("記事一覧の取得に失敗")?;
            match result.total {
                Some(total) => println!(
                    "{}件中{}件を表示 (offset={})",
                    total,
                    result.data.len(),
                    params.offset()
                ),
                None => println!("{}件を表示 (offset={})", result.data.len(), params.offset()),
            }
            for article in &result.data {
                println!("{}", summary_line(article));
            }
        }
        Command::Show { id, prev, next } => {
            let navigation = if prev {
                Navigation::Prev
            } else if next {
                Navigation::Next
            } else {
                Navigation::Current
            };
            let result = api
                .get_detail(id, navigation)
                .await
                .context(format!("記事詳細の取得に失敗: id={}", id))?;
            print_detail(&result);
        }
        Command::Delete { id } => {
            let result = api
                .delete(id)
                .await
                .context(format!("記事の削除に失敗: id={}", id))?;
            print_message(&result);
        }
        Command::Clean => {
            let result = api.clear_all().await.context("記事のクリーンアップに失敗")?;
            print_message(&result);
        }
        Command::CleanDuplicates => {
            let result = api
                .clear_duplicates()
                .await
                .context("重複記事のクリーンアップに失敗")?;
            print_message(&result);
        }
    }

    Ok(())
}

fn summary_line(article: &Article) -> String {
    let published = article
        .published_at()
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| article.publish_time.clone());
    format!(
        "[{}] {} | {} | {} | {}",
        article.id, published, article.mp_name, article.title, article.link
    )
}

fn print_detail(result: &ArticleDetailResult) {
    let article = &result.data;
    println!("{}", summary_line(article));
    println!("status: {}", article.status);
    println!("created_at: {}", article.created_at);
    if !article.content.is_empty() {
        println!();
        println!("{}", article.content);
    }
}

fn print_message(result: &MessageResult) {
    match result.clean_summary() {
        Some(summary) => println!(
            "{} (削除件数: {})",
            summary.message.unwrap_or_else(|| result.message.clone()),
            summary.deleted_count
        ),
        None => println!("{}", result.message),
    }
}
