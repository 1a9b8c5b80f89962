//! `matchday mirror`: copy remote files to local paths.

use anyhow::{Result, bail};
use matchday_store_file::write_atomic;

use crate::{fetch::PageFetcher, settings::MirrorConfig};

pub async fn run(fetcher: &impl PageFetcher, mirrors: &[MirrorConfig]) -> Result<()> {
  if mirrors.is_empty() {
    tracing::warn!("no [[mirrors]] configured; nothing to do");
    return Ok(());
  }

  let mut failed = 0;
  for mirror in mirrors {
    let result = match fetcher.fetch(&mirror.url).await {
      Ok(body) => write_atomic(&mirror.path, &body).map_err(anyhow::Error::from),
      Err(e) => Err(e.into()),
    };

    match result {
      Ok(()) => tracing::info!(url = %mirror.url, path = %mirror.path.display(), "mirrored"),
      Err(e) => {
        tracing::error!(url = %mirror.url, "{e:#}");
        failed += 1;
      }
    }
  }

  if failed > 0 {
    bail!("{failed} of {} mirrors failed", mirrors.len());
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use std::fs;

  use super::*;
  use crate::fetch::fake::FakeFetcher;

  #[tokio::test]
  async fn mirrors_bytes_and_reports_failures() {
    let dir = tempfile::tempdir().unwrap();
    let good = MirrorConfig {
      url:  "https://example.com/rounds.csv".into(),
      path: dir.path().join("out/rounds.csv"),
    };
    let bad = MirrorConfig {
      url:  "https://example.com/gone.csv".into(),
      path: dir.path().join("gone.csv"),
    };
    let fetcher = FakeFetcher::default().with(&good.url, "season,rounds\n2024-2025,38\n");

    let err = run(&fetcher, &[bad.clone(), good.clone()]).await.unwrap_err();
    assert!(err.to_string().contains("1 of 2"));

    assert_eq!(fs::read_to_string(&good.path).unwrap(), "season,rounds\n2024-2025,38\n");
    assert!(!bad.path.exists());
  }
}
