use std::{process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use client_core::{
    product_service, ClientConfig, ConfirmDialog, DeleteOutcome, FixedAnswer, Navigator,
    ProductForm, ProductFormView, ProductListView, ProductService, Route, RouteHistory,
    SortDirection, SortKey, SubmitOutcome,
};
use shared::domain::ProductId;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod terminal;

use terminal::{render_table, TerminalInput, TerminalNotifier, TerminalPrompt};

#[derive(Parser, Debug)]
#[command(name = "catalog", about = "Manage the product catalog")]
struct Cli {
    /// Config file name without extension.
    #[arg(long, default_value = "catalog")]
    config: String,
    /// Use the in-memory store seeded with demo products.
    #[arg(long, conflicts_with = "remote")]
    mock: bool,
    /// Talk to the REST backend.
    #[arg(long)]
    remote: bool,
    #[arg(long)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show every product as a table.
    List {
        #[arg(long, value_enum)]
        sort: Option<SortColumn>,
        #[arg(long, requires = "sort")]
        desc: bool,
    },
    Show {
        id: i64,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        price: f64,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Load a product, apply the given fields and save it.
    Edit {
        id: i64,
        #[command(flatten)]
        changes: FieldChanges,
    },
    Delete {
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Show notifications that have not expired yet.
    Toasts,
    /// Dismiss one notification by its number.
    Dismiss {
        toast: u64,
    },
    /// Read commands from stdin until `exit` or end of input.
    Shell,
}

#[derive(Args, Debug, Default)]
struct FieldChanges {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    price: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    quantity: Option<i64>,
}

#[derive(Parser, Debug)]
#[command(no_binary_name = true)]
struct ShellLine {
    #[command(subcommand)]
    command: Command,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SortColumn {
    Name,
    Description,
    Price,
    Quantity,
}

impl From<SortColumn> for SortKey {
    fn from(column: SortColumn) -> Self {
        match column {
            SortColumn::Name => SortKey::Name,
            SortColumn::Description => SortKey::Description,
            SortColumn::Price => SortKey::Price,
            SortColumn::Quantity => SortKey::Quantity,
        }
    }
}

struct Session {
    service: Arc<dyn ProductService>,
    history: Arc<RouteHistory>,
    notifier: Arc<TerminalNotifier>,
    input: Arc<TerminalInput>,
}

impl Session {
    fn list_view(&self, dialog: Arc<dyn ConfirmDialog>) -> ProductListView {
        ProductListView::new(
            self.service.clone(),
            self.history.clone(),
            dialog,
            self.notifier.clone(),
        )
    }

    fn form_view(&self) -> ProductFormView {
        ProductFormView::new(
            self.service.clone(),
            self.history.clone(),
            self.notifier.clone(),
        )
    }

    fn prompt(&self) -> Arc<dyn ConfirmDialog> {
        Arc::new(TerminalPrompt::new(self.input.clone()))
    }

    /// Runs one command. Returns `false` when the operation did not succeed.
    async fn run(&self, command: Command) -> bool {
        match command {
            Command::List { sort, desc } => {
                self.history.navigate(Route::ProductList);
                let mut view = self.list_view(self.prompt());
                if let Some(column) = sort {
                    let direction = if desc {
                        SortDirection::Descending
                    } else {
                        SortDirection::Ascending
                    };
                    view.sort_by(column.into(), direction);
                }
                let loaded = view.activate().await;
                if loaded {
                    print!("{}", render_table(view.rows()));
                }
                loaded
            }
            Command::Show { id } => match self.service.get_by_id(ProductId(id)).await {
                Ok(product) => {
                    print!("{}", render_table(std::slice::from_ref(&product)));
                    true
                }
                Err(error) => {
                    eprintln!("[error] {error}");
                    false
                }
            },
            Command::Create {
                name,
                description,
                price,
                quantity,
            } => {
                self.history.navigate(Route::NewProduct);
                let mut view = self.form_view();
                view.activate_route(Route::NewProduct).await;
                let form = view.form_mut();
                form.name = name;
                form.description = description;
                form.price = price;
                form.quantity = quantity;
                self.submit(&mut view).await
            }
            Command::Edit { id, changes } => {
                let route = Route::EditProduct(ProductId(id));
                self.history.navigate(route);
                let mut view = self.form_view();
                if !view.activate_route(route).await {
                    return false;
                }
                apply_changes(view.form_mut(), changes);
                self.submit(&mut view).await
            }
            Command::Delete { id, yes } => {
                let dialog: Arc<dyn ConfirmDialog> = if yes {
                    Arc::new(FixedAnswer(true))
                } else {
                    self.prompt()
                };
                let mut view = self.list_view(dialog);
                if !view.activate().await {
                    return false;
                }
                let Some(product) = view
                    .rows()
                    .iter()
                    .find(|p| p.id == Some(ProductId(id)))
                    .cloned()
                else {
                    eprintln!("[error] product {id} not found");
                    return false;
                };
                match view.delete(&product).await {
                    DeleteOutcome::Deleted => true,
                    DeleteOutcome::Cancelled => {
                        println!("Nothing deleted.");
                        true
                    }
                    DeleteOutcome::Failed | DeleteOutcome::Skipped => false,
                }
            }
            Command::Toasts => {
                print!("{}", self.notifier.render_toasts());
                true
            }
            Command::Dismiss { toast } => {
                let dismissed = self.notifier.dismiss(toast);
                if !dismissed {
                    eprintln!("[error] no notification #{toast}");
                }
                dismissed
            }
            Command::Shell => {
                eprintln!("[error] already in a shell");
                false
            }
        }
    }

    async fn submit(&self, view: &mut ProductFormView) -> bool {
        match view.submit().await {
            SubmitOutcome::Saved(product) => {
                print!("{}", render_table(std::slice::from_ref(&product)));
                true
            }
            SubmitOutcome::Invalid(violations) => {
                for violation in violations {
                    eprintln!("  - {violation}");
                }
                false
            }
            SubmitOutcome::Failed => false,
        }
    }

    async fn shell(&self) {
        println!("Commands: list, show, create, edit, delete, toasts, dismiss, exit.");
        while let Some(line) = self.input.read_line("catalog> ").await {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if matches!(line, "exit" | "quit") {
                break;
            }
            match parse_shell_line(line) {
                Ok(command) => {
                    self.run(command).await;
                }
                Err(error) => eprintln!("{error}"),
            }
            debug!(route = %self.history.current(), "shell command finished");
        }
    }
}

/// Splits a shell line the way a POSIX shell would, so quoted values keep their spaces.
fn parse_shell_line(line: &str) -> Result<Command> {
    let words = shlex::split(line).context("unbalanced quotes in command line")?;
    let parsed = ShellLine::try_parse_from(words)?;
    Ok(parsed.command)
}

fn apply_changes(form: &mut ProductForm, changes: FieldChanges) {
    if let Some(name) = changes.name {
        form.name = name;
    }
    if let Some(description) = changes.description {
        form.description = description;
    }
    if let Some(price) = changes.price {
        form.price = price;
    }
    if let Some(quantity) = changes.quantity {
        form.quantity = quantity;
    }
}

fn client_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = ClientConfig::load_from(&cli.config)
        .with_context(|| format!("failed to load client config '{}'", cli.config))?;
    if cli.mock {
        config.mock = true;
    }
    if cli.remote {
        config.mock = false;
    }
    if let Some(api_url) = &cli.api_url {
        config.api_url = api_url.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let config = client_config(&cli)?;
    info!(backend = ?config.backend(), api_url = %config.api_url, "catalog client starting");
    let service = product_service(&config).context("failed to build product backend")?;

    let session = Session {
        service,
        history: Arc::new(RouteHistory::default()),
        notifier: Arc::new(TerminalNotifier::default()),
        input: Arc::new(TerminalInput::new()),
    };

    let ok = match cli.command {
        Command::Shell => {
            session.shell().await;
            true
        }
        command => session.run(command).await,
    };
    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_shell_arguments_keep_spaces() {
        let command = parse_shell_line(
            r#"create --name "Mouse Gamer" --description 'RGB high precision' --price 150 --quantity 5"#,
        )
        .expect("parse");
        let Command::Create {
            name,
            description,
            price,
            quantity,
        } = command
        else {
            panic!("expected create, got {command:?}");
        };
        assert_eq!(name, "Mouse Gamer");
        assert_eq!(description, "RGB high precision");
        assert_eq!(price, 150.0);
        assert_eq!(quantity, 5);
    }

    #[test]
    fn quoted_edit_name_is_one_value() {
        let command = parse_shell_line(r#"edit 2 --name "Teclado Mecánico RGB""#).expect("parse");
        let Command::Edit { id, changes } = command else {
            panic!("expected edit, got {command:?}");
        };
        assert_eq!(id, 2);
        assert_eq!(changes.name.as_deref(), Some("Teclado Mecánico RGB"));
        assert!(changes.price.is_none());
    }

    #[test]
    fn unbalanced_quotes_are_rejected() {
        let err = parse_shell_line(r#"create --name "Mouse Gamer --description x"#)
            .expect_err("unbalanced");
        assert!(err.to_string().contains("unbalanced quotes"));
    }

    #[test]
    fn dismiss_takes_toast_number() {
        let command = parse_shell_line("dismiss 3").expect("parse");
        assert!(matches!(command, Command::Dismiss { toast: 3 }));
    }

    #[test]
    fn unknown_shell_command_is_a_parse_error() {
        assert!(parse_shell_line("explode 3").is_err());
    }
}
