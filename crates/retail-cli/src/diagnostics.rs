//! Offline diagnostics: nothing here touches the network.

use std::path::Path;

use retail_core::{is_unsafe_backend_url, resolve_backend_urls, resolve_data_source, AppConfig};

/// Report which sales data the model server would load.
///
/// # Errors
///
/// Returns an error if the working directory cannot be determined.
pub(crate) fn run_data_source(config: &AppConfig, dir: Option<&Path>) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let root = retail_core::resolve_root(dir.or(config.model_server_dir.as_deref()), &cwd);
    let info = resolve_data_source(&root);

    println!("root:       {}", info.root.display());
    println!("data dir:   {}", info.data_dir.display());
    println!("source:     {}", info.source);
    println!("sql parts:  {}", info.sql_file_count);
    println!(
        "csv:        {}",
        info.csv_path
            .as_deref()
            .map_or_else(|| "-".to_string(), |p| p.display().to_string())
    );

    Ok(())
}

pub(crate) fn run_resolve(config: &AppConfig) {
    let backend = &config.backend;
    println!("env:         {}", config.env);
    println!("mode:        {}", backend.mode);
    match backend.configured_url.as_deref() {
        Some(url) if is_unsafe_backend_url(url) => println!("configured:  {url} (unsafe)"),
        Some(url) => println!("configured:  {url}"),
        None => println!("configured:  -"),
    }
    println!("production:  {}", backend.production_url);

    let origins = resolve_backend_urls(backend);
    if origins.is_empty() {
        println!("origins:     none; proxy routes will serve empty defaults");
    } else {
        for (i, origin) in origins.iter().enumerate() {
            println!("origin {}:    {origin}", i + 1);
        }
    }
    println!("gateway:     {}", config.dashboard_url);
}
