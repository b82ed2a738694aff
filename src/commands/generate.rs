//! Generate static files

use anyhow::Result;

use crate::generator::Generator;
use crate::Folio;

/// Export the whole site to the public directory
pub fn run(folio: &Folio) -> Result<()> {
    let start = std::time::Instant::now();

    let generator = Generator::new(folio)?;
    let stats = generator.generate()?;

    tracing::info!(
        "Generated {} posts, {} pages and {} assets in {:.2}s",
        stats.posts,
        stats.pages,
        stats.assets,
        start.elapsed().as_secs_f64()
    );

    Ok(())
}
