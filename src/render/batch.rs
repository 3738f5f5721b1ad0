use image::{DynamicImage, RgbaImage};
use rayon::prelude::*;

use crate::{
    config::render_spec::RenderSpec,
    foundation::error::{MemeError, MemeResult},
    render::renderer::render,
};

/// One image and its two captions.
#[derive(Clone, Debug)]
pub struct BatchJob {
    pub image: DynamicImage,
    pub top: String,
    pub bottom: String,
}

/// Render every job on a dedicated pool. Results come back in job order; one failed job does not
/// stop the others.
///
/// `threads = None` lets rayon pick the thread count.
pub fn render_batch(
    jobs: &[BatchJob],
    spec: &RenderSpec,
    threads: Option<usize>,
) -> MemeResult<Vec<MemeResult<RgbaImage>>> {
    spec.validate()?;
    let pool = build_thread_pool(threads)?;
    tracing::debug!(jobs = jobs.len(), threads = pool.current_num_threads(), "batch render");
    Ok(pool.install(|| {
        jobs.par_iter()
            .map(|job| render(&job.image, &job.top, &job.bottom, spec))
            .collect()
    }))
}

fn build_thread_pool(threads: Option<usize>) -> MemeResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(MemeError::validation("batch 'threads' must be >= 1 when set"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| MemeError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/batch.rs"]
mod tests;
