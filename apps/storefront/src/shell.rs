//! # Storefront Shell
//!
//! Line-oriented front end over the commands module. One command per line
//! on the input, rendered text on the output. Logs go to stderr, so the
//! output stays clean for piping.
//!
//! ## Commands
//! ```text
//! add <id> [qty] [license…]   add a product (license may contain spaces)
//! update <id> <qty>           set quantity; 0 or less removes the line
//! remove <id>                 remove a line
//! clear                       empty the cart
//! cart                        show lines and totals
//! checkout <details.json>     submit the order
//! status                      persistence mode and database health
//! help                        this text
//! quit                        leave (end of input works too)
//! ```

use std::fmt::Write as _;
use std::path::PathBuf;
use std::str::FromStr;

use pixelmart_core::FeePolicy;
use pixelmart_db::Database;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::client::Marketplace;
use crate::commands::{self, CartResponse, CheckoutResponse, StatusResponse};
use crate::error::ApiError;
use crate::state::{CartStore, SnapshotStore};

pub const HELP: &str = "\
Commands:
  add <id> [qty] [license...]   add a product to the cart
  update <id> <qty>             set a quantity (0 or less removes the line)
  remove <id>                   remove a line
  clear                         empty the cart
  cart                          show the cart and its totals
  checkout <details.json>       place the order
  status                        show session status
  help                          show this help
  quit                          exit
";

// =============================================================================
// Parsing
// =============================================================================

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Add {
        product_id: String,
        quantity: Option<i64>,
        license: Option<String>,
    },
    Update {
        product_id: String,
        quantity: i64,
    },
    Remove {
        product_id: String,
    },
    Clear,
    Cart,
    Checkout {
        details_path: PathBuf,
    },
    Status,
    Help,
    Quit,
}

/// Why a shell line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShellParseError {
    #[error("empty line")]
    Empty,

    #[error("unknown command '{0}' (type 'help')")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),
}

impl FromStr for ShellCommand {
    type Err = ShellParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(ShellParseError::Empty);
        };
        let args: Vec<&str> = words.collect();

        match verb.to_ascii_lowercase().as_str() {
            "add" => {
                const USAGE: &str = "add <id> [qty] [license...]";
                let (&product_id, rest) = args.split_first().ok_or(ShellParseError::Usage(USAGE))?;

                let (quantity, license_words) = match rest.split_first() {
                    Some((first, tail)) => match first.parse::<i64>() {
                        Ok(qty) => (Some(qty), tail),
                        Err(_) => (None, rest),
                    },
                    None => (None, rest),
                };
                let license = (!license_words.is_empty()).then(|| license_words.join(" "));

                Ok(ShellCommand::Add {
                    product_id: product_id.to_string(),
                    quantity,
                    license,
                })
            }
            "update" => {
                const USAGE: &str = "update <id> <qty>";
                match args.as_slice() {
                    [product_id, quantity] => Ok(ShellCommand::Update {
                        product_id: product_id.to_string(),
                        quantity: quantity.parse().map_err(|_| ShellParseError::Usage(USAGE))?,
                    }),
                    _ => Err(ShellParseError::Usage(USAGE)),
                }
            }
            "remove" => match args.as_slice() {
                [product_id] => Ok(ShellCommand::Remove {
                    product_id: product_id.to_string(),
                }),
                _ => Err(ShellParseError::Usage("remove <id>")),
            },
            "checkout" => {
                if args.is_empty() {
                    return Err(ShellParseError::Usage("checkout <details.json>"));
                }
                Ok(ShellCommand::Checkout {
                    details_path: PathBuf::from(args.join(" ")),
                })
            }
            "clear" => no_args(args, ShellCommand::Clear, "clear"),
            "cart" => no_args(args, ShellCommand::Cart, "cart"),
            "status" => no_args(args, ShellCommand::Status, "status"),
            "help" => Ok(ShellCommand::Help),
            "quit" | "exit" => Ok(ShellCommand::Quit),
            _ => Err(ShellParseError::Unknown(verb.to_string())),
        }
    }
}

fn no_args(
    args: Vec<&str>,
    command: ShellCommand,
    usage: &'static str,
) -> Result<ShellCommand, ShellParseError> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(ShellParseError::Usage(usage))
    }
}

// =============================================================================
// Session
// =============================================================================

/// The running shell: cart session, marketplace and (optional) database.
pub struct Shell<S, M> {
    cart: CartStore<S>,
    marketplace: M,
    db: Option<Database>,
    api_url: String,
}

impl<S, M> Shell<S, M>
where
    S: SnapshotStore,
    M: Marketplace,
{
    pub fn new(cart: CartStore<S>, marketplace: M, db: Option<Database>, api_url: impl Into<String>) -> Self {
        Shell {
            cart,
            marketplace,
            db,
            api_url: api_url.into(),
        }
    }

    pub fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    /// Runs one command and renders its result.
    pub async fn execute(&mut self, command: ShellCommand) -> Result<String, ApiError> {
        debug!(?command, "Executing shell command");

        let policy = *self.cart.policy();
        match command {
            ShellCommand::Add {
                product_id,
                quantity,
                license,
            } => {
                let response =
                    commands::add_product(&mut self.cart, &self.marketplace, &product_id, quantity, license)
                        .await?;
                Ok(render_cart(&response, &policy))
            }
            ShellCommand::Update {
                product_id,
                quantity,
            } => {
                let response = commands::update_cart_item(&mut self.cart, &product_id, quantity).await;
                Ok(render_cart(&response, &policy))
            }
            ShellCommand::Remove { product_id } => {
                let response = commands::remove_from_cart(&mut self.cart, &product_id).await;
                Ok(render_cart(&response, &policy))
            }
            ShellCommand::Clear => {
                let response = commands::clear_cart(&mut self.cart).await;
                Ok(render_cart(&response, &policy))
            }
            ShellCommand::Cart => Ok(render_cart(&commands::get_cart(&self.cart), &policy)),
            ShellCommand::Checkout { details_path } => {
                let details = commands::load_checkout_details(&details_path).await?;
                let response = commands::checkout(&mut self.cart, &self.marketplace, &details).await?;
                Ok(render_checkout(&response))
            }
            ShellCommand::Status => {
                let status = commands::get_status(&self.cart, self.db.as_ref(), &self.api_url).await?;
                Ok(render_status(&status))
            }
            ShellCommand::Help | ShellCommand::Quit => Ok(HELP.to_string()),
        }
    }

    /// Reads commands until `quit` or end of input.
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();

        while let Some(line) = lines.next_line().await? {
            let text = match line.parse::<ShellCommand>() {
                Ok(ShellCommand::Quit) => break,
                Ok(command) => match self.execute(command).await {
                    Ok(text) => text,
                    Err(e) => render_error(&e),
                },
                Err(ShellParseError::Empty) => continue,
                Err(e) => format!("{e}\n"),
            };

            output.write_all(text.as_bytes()).await?;
            output.flush().await?;
        }

        Ok(())
    }
}

// =============================================================================
// Rendering
// =============================================================================

pub fn render_cart(cart: &CartResponse, policy: &FeePolicy) -> String {
    if cart.items.is_empty() {
        return "Your cart is empty.\n".to_string();
    }

    let mut out = String::new();
    for item in &cart.items {
        let name = match &item.license {
            Some(license) => format!("{} [{}]", item.product.name, license),
            None => item.product.name.clone(),
        };
        let _ = writeln!(
            out,
            "  {:<16} {:<36} x{:<4} {:>11}",
            item.product.id,
            name,
            item.quantity,
            item.line_total().to_string()
        );
    }

    let totals = &cart.totals;
    let _ = writeln!(out, "  {}", "─".repeat(70));
    let _ = writeln!(out, "  {:<58} {:>11}", "Subtotal", totals.subtotal.to_string());
    let _ = writeln!(
        out,
        "  {:<58} {:>11}",
        format!("Tax ({}%)", policy.tax_rate.percentage()),
        totals.tax.to_string()
    );
    let _ = writeln!(out, "  {:<58} {:>11}", "Fee", totals.fee.to_string());
    let _ = writeln!(out, "  {:<58} {:>11}", "Total", totals.total.to_string());
    if !cart.persistent {
        let _ = writeln!(out, "  (cart is not being saved)");
    }
    out
}

pub fn render_checkout(response: &CheckoutResponse) -> String {
    format!(
        "Order placed: {} (charged {})\n",
        response.order_number, response.totals.total
    )
}

pub fn render_status(status: &StatusResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  slot:        {}", status.slot);
    let _ = writeln!(
        out,
        "  persistence: {}",
        if status.persistent { "database" } else { "in-memory only" }
    );
    let _ = writeln!(out, "  lines:       {}", status.lines);
    let _ = writeln!(
        out,
        "  fees:        tax {} bps, flat fee {}",
        status.tax_rate_bps, status.flat_fee
    );
    let _ = writeln!(out, "  api:         {}", status.api_url);
    match &status.database {
        Some(db) => {
            let _ = writeln!(
                out,
                "  database:    {} ({}/{} migrations applied)",
                if db.healthy { "healthy" } else { "unreachable" },
                db.migrations_applied,
                db.migrations_total
            );
        }
        None => {
            let _ = writeln!(out, "  database:    not open");
        }
    }
    out
}

pub fn render_error(err: &ApiError) -> String {
    format!("error [{}]: {}\n", err.code.as_str(), err.message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{details, FakeMarketplace};
    use crate::state::MemorySnapshotStore;
    use std::io::Write;
    use tokio::io::BufReader;

    #[test]
    fn test_parse_add() {
        assert_eq!(
            "add p1".parse::<ShellCommand>().unwrap(),
            ShellCommand::Add {
                product_id: "p1".to_string(),
                quantity: None,
                license: None
            }
        );
        assert_eq!(
            "add p1 3 Extended Commercial".parse::<ShellCommand>().unwrap(),
            ShellCommand::Add {
                product_id: "p1".to_string(),
                quantity: Some(3),
                license: Some("Extended Commercial".to_string())
            }
        );
        assert_eq!(
            "ADD p1 Standard".parse::<ShellCommand>().unwrap(),
            ShellCommand::Add {
                product_id: "p1".to_string(),
                quantity: None,
                license: Some("Standard".to_string())
            }
        );
    }

    #[test]
    fn test_parse_other_commands() {
        assert_eq!(
            "update p1 -1".parse::<ShellCommand>().unwrap(),
            ShellCommand::Update {
                product_id: "p1".to_string(),
                quantity: -1
            }
        );
        assert_eq!(
            "  remove   p2 ".parse::<ShellCommand>().unwrap(),
            ShellCommand::Remove {
                product_id: "p2".to_string()
            }
        );
        assert_eq!(
            "checkout order.json".parse::<ShellCommand>().unwrap(),
            ShellCommand::Checkout {
                details_path: PathBuf::from("order.json")
            }
        );
        assert_eq!("clear".parse::<ShellCommand>().unwrap(), ShellCommand::Clear);
        assert_eq!("cart".parse::<ShellCommand>().unwrap(), ShellCommand::Cart);
        assert_eq!("status".parse::<ShellCommand>().unwrap(), ShellCommand::Status);
        assert_eq!("exit".parse::<ShellCommand>().unwrap(), ShellCommand::Quit);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("   ".parse::<ShellCommand>(), Err(ShellParseError::Empty));
        assert_eq!(
            "buy p1".parse::<ShellCommand>(),
            Err(ShellParseError::Unknown("buy".to_string()))
        );
        for line in ["add", "update p1", "update p1 two", "remove", "checkout", "clear now"] {
            assert!(
                matches!(line.parse::<ShellCommand>(), Err(ShellParseError::Usage(_))),
                "{line:?} should print usage"
            );
        }
    }

    async fn shell() -> Shell<MemorySnapshotStore, FakeMarketplace> {
        let cart = CartStore::hydrate(MemorySnapshotStore::new(), "cart", FeePolicy::default()).await;
        Shell::new(cart, FakeMarketplace::with_catalogue(), None, "http://localhost:8080/api")
    }

    async fn run(shell: &mut Shell<MemorySnapshotStore, FakeMarketplace>, script: &str) -> String {
        let mut output = Vec::new();
        shell
            .run(BufReader::new(script.as_bytes()), &mut output)
            .await
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[tokio::test]
    async fn test_session_script() {
        let mut shell = shell().await;

        let output = run(&mut shell, "add p1\nadd p2 1 Extended\nupdate p1 3\ncart\n").await;

        assert!(output.contains("Pixel Font Bundle [Extended]"));
        assert!(output.contains("$159.00"));
        assert!(output.contains("Tax (6%)"));
        assert!(output.contains("$9.54"));
        assert!(output.contains("$4.99"));
        assert!(output.contains("$173.53"));
        assert_eq!(shell.cart().total_item_count(), 4);
    }

    #[tokio::test]
    async fn test_errors_are_rendered_and_session_continues() {
        let mut shell = shell().await;

        let output = run(&mut shell, "add ghost\nfrobnicate\n\nadd p1\n").await;

        assert!(output.contains("error [NOT_FOUND]: Product not found: ghost"));
        assert!(output.contains("unknown command 'frobnicate'"));
        assert_eq!(shell.cart().line_count(), 1);
    }

    #[tokio::test]
    async fn test_oversized_quantities_do_not_end_session() {
        let mut shell = shell().await;

        let output = run(
            &mut shell,
            "add p1 10000000000000000\nadd p1 9223372036854775807\nupdate p1 9223372036854775807\ncart\n",
        )
        .await;

        let line = &shell.cart().items()[0];
        assert_eq!(line.quantity, pixelmart_core::MAX_ITEM_QUANTITY);
        assert_eq!(shell.cart().subtotal().cents(), 3800 * pixelmart_core::MAX_ITEM_QUANTITY);
        assert!(output.contains("x999"));
        assert!(output.contains("$37962.00"));
    }

    #[tokio::test]
    async fn test_quit_stops_reading() {
        let mut shell = shell().await;

        run(&mut shell, "add p1\nquit\nadd p2\n").await;

        assert_eq!(shell.cart().line_count(), 1);
    }

    #[tokio::test]
    async fn test_checkout_from_file() {
        let mut shell = shell().await;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&details()).unwrap()).unwrap();

        let script = format!("checkout {}\nadd p1 2\ncheckout {}\n", file.path().display(), file.path().display());
        let output = run(&mut shell, &script).await;

        assert!(output.contains("error [CART_ERROR]"));
        assert!(output.contains("Order placed: PM-1001 (charged $85.55)"));
        assert!(shell.cart().is_empty());
    }

    #[tokio::test]
    async fn test_status() {
        let mut shell = shell().await;

        let output = run(&mut shell, "status\n").await;

        assert!(output.contains("persistence: database"));
        assert!(output.contains("tax 600 bps, flat fee $4.99"));
        assert!(output.contains("database:    not open"));
    }

    #[test]
    fn test_render_empty_cart() {
        let response = CartResponse {
            items: Vec::new(),
            item_count: 0,
            totals: Default::default(),
            persistent: true,
        };
        assert_eq!(render_cart(&response, &FeePolicy::default()), "Your cart is empty.\n");
    }
}
