//! Route listing command.

use anyhow::Result;
use serde::Serialize;
use slugdoc_content::Slug;

use crate::config::ConfigFile;

/// Routes generated for one content root.
#[derive(Debug, Serialize)]
struct RootRoutes<'a> {
    root: &'a str,
    slugs: Vec<Slug>,
}

/// Run the routes command.
pub fn run(config: &ConfigFile, only: Option<&str>, json: bool) -> Result<()> {
    let routes = collect(config, only)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&routes)?);
    } else {
        for line in routes.iter().flat_map(route_lines) {
            println!("{}", line);
        }
    }

    let total: usize = routes.iter().map(|r| r.slugs.len()).sum();
    tracing::info!("Listed {} routes from {} roots", total, routes.len());

    Ok(())
}

fn collect<'a>(config: &'a ConfigFile, only: Option<&str>) -> Result<Vec<RootRoutes<'a>>> {
    let library = config.library();

    if let Some(name) = only {
        if config.root(name).is_none() {
            anyhow::bail!("Unknown content root: {}", name);
        }
    }

    config
        .roots
        .iter()
        .filter(|root| only.map_or(true, |name| root.name == name))
        .map(|root| -> Result<RootRoutes<'a>> {
            let slugs = library.routes(&root.name, root.landing)?;
            Ok(RootRoutes {
                root: &root.name,
                slugs,
            })
        })
        .collect()
}

fn route_lines(routes: &RootRoutes<'_>) -> Vec<String> {
    routes
        .slugs
        .iter()
        .map(|slug| {
            if slug.is_landing() {
                routes.root.to_string()
            } else {
                format!("{}/{}", routes.root, slug)
            }
        })
        .collect()
}
