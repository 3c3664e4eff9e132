//! Static multi-page HTML rendering of the dashboard.

mod pages;

#[doc(inline)]
pub use pages::build_site;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use plotly::Plot;
use polars::frame::DataFrame;
use polars::prelude::AnyValue;

use crate::fs::ensure_dir_exists;

/// One dashboard page: a slug for the file name, a navigation title, and
/// content blocks in display order.
pub struct Page {
    slug: String,
    title: String,
    blocks: Vec<Markup>,
    figures: usize,
}

impl Page {
    pub fn new(slug: &str, title: &str) -> Self {
        Self { slug: slug.to_string(), title: title.to_string(), blocks: Vec::new(), figures: 0 }
    }

    pub fn slug(&self) -> &str { &self.slug }

    pub fn title(&self) -> &str { &self.title }

    /// Add a section heading within the page.
    pub fn add_heading(&mut self, text: &str) {
        self.blocks.push(html! { h2 { (text) } });
    }

    /// Add a paragraph of narrative text.
    pub fn add_text(&mut self, text: &str) {
        self.blocks.push(html! { p { (text) } });
    }

    /// Embed a figure. Every figure gets a stable div id derived from the
    /// page slug, so anchors keep working across rebuilds.
    pub fn add_plot(&mut self, plot: &Plot) {
        let id = format!("fig-{}-{}", self.slug, self.figures);
        self.figures += 1;
        self.blocks.push(html! {
            div class="figure" {
                (PreEscaped(plot.to_inline_html(Some(id.as_str()))))
            }
        });
    }

    /// Add the rows behind the page as a table collapsed behind a toggle.
    pub fn add_table(&mut self, df: &DataFrame) -> Result<()> {
        let names: Vec<String> =
            df.get_column_names().iter().map(|name| name.to_string()).collect();
        let mut rows: Vec<Vec<String>> = Vec::with_capacity(df.height());
        for row in 0..df.height() {
            let mut cells = Vec::with_capacity(df.width());
            for column in df.get_columns() {
                cells.push(cell_text(&column.get(row)?));
            }
            rows.push(cells);
        }

        self.blocks.push(html! {
            details {
                summary { "Show the data behind this page" }
                table {
                    thead {
                        tr { @for name in &names { th { (name) } } }
                    }
                    tbody {
                        @for cells in &rows {
                            tr { @for cell in cells { td { (cell) } } }
                        }
                    }
                }
            }
        });
        Ok(())
    }
}

/// Table cell text: nulls print empty, text prints unquoted, numbers plain.
fn cell_text(value: &AnyValue) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(text) => text.to_string(),
        AnyValue::StringOwned(text) => text.to_string(),
        other => other.to_string(),
    }
}

/// The whole dashboard: an ordered set of pages sharing one shell.
pub struct Site {
    title: String,
    pages: Vec<Page>,
}

impl Site {
    pub fn new(title: &str) -> Self {
        Self { title: title.to_string(), pages: Vec::new() }
    }

    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    pub fn pages(&self) -> &[Page] { &self.pages }

    /// Write one HTML file per page into `out_dir`. Existing files are only
    /// replaced when `force` is set; every target is checked before the
    /// first write.
    pub fn write(&self, out_dir: &Path, force: bool) -> Result<Vec<PathBuf>> {
        ensure_dir_exists(out_dir)?;

        let paths: Vec<PathBuf> =
            self.pages.iter().map(|page| out_dir.join(format!("{}.html", page.slug))).collect();
        if !force {
            for path in &paths {
                if path.exists() {
                    anyhow::bail!(
                        "Refusing to overwrite existing file: {} (use --force)",
                        path.display()
                    );
                }
            }
        }
        for (page, path) in self.pages.iter().zip(&paths) {
            fs::write(path, self.render_page(page).into_string())
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        Ok(paths)
    }

    fn render_page(&self, page: &Page) -> Markup {
        let generated = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1";
                    title { (page.title) " – " (self.title) }
                    script src="https://cdn.plot.ly/plotly-latest.min.js" {}
                    style { (PreEscaped(STYLE)) }
                }
                body {
                    header {
                        h1 { (self.title) }
                        nav {
                            @for entry in &self.pages {
                                @if entry.slug == page.slug {
                                    a href=(format!("{}.html", entry.slug)) class="active" { (entry.title) }
                                } @else {
                                    a href=(format!("{}.html", entry.slug)) { (entry.title) }
                                }
                            }
                        }
                    }
                    main {
                        h2 class="page-title" { (page.title) }
                        @for block in &page.blocks {
                            (block)
                        }
                    }
                    footer {
                        p { "Generated on: " (generated) }
                    }
                }
            }
        }
    }
}

const STYLE: &str = "
    body { font-family: Arial, sans-serif; margin: 0; color: #1f2933; }
    header { padding: 15px 25px; background: linear-gradient(135deg, #4a90e2, #145da0); color: white; }
    header h1 { margin: 0 0 10px 0; }
    nav a { color: white; margin-right: 18px; text-decoration: none; opacity: 0.8; }
    nav a.active, nav a:hover { opacity: 1.0; border-bottom: 2px solid white; }
    main { max-width: 1600px; padding: 10px 25px; }
    h2.page-title { border-bottom: 1px solid #d3d8de; padding-bottom: 6px; }
    .figure { margin: 20px 0; }
    details { margin: 15px 0; }
    summary { cursor: pointer; color: #145da0; }
    table { border-collapse: collapse; margin-top: 10px; }
    th, td { border: 1px solid #d3d8de; padding: 4px 10px; text-align: right; }
    th { background: #eef2f7; }
    footer { padding: 10px 25px; color: #6b7280; font-size: 0.9em; }
";
