//! navctl: inspect an admin navigation table from the command line.
//!
//! ```text
//! navctl check
//! navctl resolve "/admin/product-menu?view=category&categoryId=cat_1"
//! navctl breadcrumbs /admin/orders/abc123 --entities entities.json
//! navctl children admin.products
//! navctl href "/admin/product-menu?view=all-labels"
//! navctl tree
//! ```
//!
//! Without `--config` the embedded admin table is used. Output is JSON on
//! stdout; logs go to stderr.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;

use admin_nav::config::{load_config, NavigationConfig};
use admin_nav::navigation::{
    breadcrumb, navigable_children, NavigationContext, TrailPhase, TrailTracker,
};
use admin_nav::observability::logging;
use admin_nav::resolvers::{BreadcrumbResolvers, MemoryStore};
use admin_nav::routing::{RouteRegistry, Router};

#[derive(Parser)]
#[command(name = "navctl")]
#[command(about = "Route resolution and breadcrumbs for the admin navigation table", long_about = None)]
struct Cli {
    /// Navigation table (TOML). Defaults to the embedded admin table.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the table and print a summary
    Check,
    /// Resolve a location to its route and ancestors
    Resolve { location: String },
    /// Build the breadcrumb trail for a location
    Breadcrumbs {
        location: String,
        /// Entity names (JSON) used to resolve dynamic segments
        #[arg(short, long)]
        entities: Option<PathBuf>,
    },
    /// List navigable children of a route
    Children { id: String },
    /// Map a legacy href to its route
    Href { href: String },
    /// Print the navigation tree
    Tree,
}

#[derive(Serialize)]
struct TreeNode {
    id: String,
    label: Option<String>,
    href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<TreeNode>,
}

fn tree_node(registry: &RouteRegistry, id: &str) -> Option<TreeNode> {
    let entry = registry.get(id)?;
    Some(TreeNode {
        id: entry.id.clone(),
        label: entry.label.clone(),
        href: breadcrumb::build_href(entry),
        icon: entry.icon.clone(),
        children: registry
            .children_of(id)
            .filter_map(|child| tree_node(registry, &child.id))
            .collect(),
    })
}

fn print_json(value: &impl Serialize) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => NavigationConfig::admin()?,
    };
    logging::init(&config.observability)?;

    let router = Arc::new(Router::from_config(&config)?);
    let registry = router.registry();

    match cli.command {
        Commands::Check => {
            print_json(&json!({
                "valid": true,
                "routes": registry.len(),
                "navigable": registry.navigable().count(),
                "groups": registry.top_level_groups().count(),
                "home": registry.home().id,
                "tie_break": registry.tie_break(),
            }))?;
        }
        Commands::Resolve { location } => {
            let ctx = NavigationContext::for_href(&router, &location);
            let resolved = ctx.resolved().map(|resolved| {
                let mut ancestors: Vec<_> = ctx.ancestors().iter().collect();
                ancestors.sort_unstable();
                json!({
                    "route": resolved.route.id,
                    "score": resolved.score.points(),
                    "ancestors": ancestors,
                    "resolver": ctx.pending_resolver(),
                })
            });
            print_json(&json!({
                "location": ctx.location().to_string(),
                "resolved": resolved,
                "menu_builder_view": ctx.menu_builder_view(),
            }))?;
        }
        Commands::Breadcrumbs { location, entities } => {
            let ctx = NavigationContext::for_href(&router, &location);
            let tracker = TrailTracker::new();

            if let Some(pending) = tracker.navigate(&ctx) {
                let store = match &entities {
                    Some(path) => MemoryStore::load_from_file(path)?,
                    None => MemoryStore::new(),
                };
                let resolvers = BreadcrumbResolvers::new(Arc::clone(&router), Arc::new(store));
                tracker.resolve_pending(pending, &resolvers).await;
            }

            let snapshot = tracker.current();
            let (phase, outcome) = match snapshot.phase {
                TrailPhase::Unresolved => ("unresolved", None),
                TrailPhase::Static => ("static", None),
                TrailPhase::Pending(_) => ("pending", None),
                TrailPhase::Resolved => ("resolved", None),
                TrailPhase::Fallback(outcome) => ("fallback", Some(outcome)),
            };
            print_json(&json!({
                "phase": phase,
                "outcome": outcome,
                "trail": snapshot.trail,
            }))?;
        }
        Commands::Children { id } => {
            if !registry.contains(&id) {
                return Err(format!("unknown route `{id}`").into());
            }
            print_json(&navigable_children(registry, &id))?;
        }
        Commands::Href { href } => {
            let found = router.find_by_href(&href).map(|route| {
                json!({
                    "id": route.id,
                    "label": route.label,
                    "href": breadcrumb::build_href(route),
                })
            });
            print_json(&found)?;
        }
        Commands::Tree => {
            let roots: Vec<_> = registry
                .entries()
                .iter()
                .filter(|entry| entry.is_root())
                .filter_map(|entry| tree_node(registry, &entry.id))
                .collect();
            print_json(&roots)?;
        }
    }

    Ok(())
}
