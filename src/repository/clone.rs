//! Obtaining a local copy of the repository to fingerprint

use anyhow::{Context, Result};
use git2::build::CheckoutBuilder;
use git2::{BranchType, Repository};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::util::{repo_dir_name, short_commit};

/// Clone `url` into `work_dir`, or bring an existing clone up to date.
///
/// Returns the path of the local repository.
pub fn clone_or_update(url: &str, work_dir: &Path) -> Result<PathBuf> {
    let dest = work_dir.join(repo_dir_name(url));

    if dest.join(".git").is_dir() {
        info!("Updating existing clone at {}", dest.display());
        let repo = Repository::open(&dest)
            .with_context(|| format!("Failed to open git repository at {}", dest.display()))?;
        update(&repo)?;
        return Ok(dest);
    }

    info!("Cloning {} into {}", url, dest.display());
    Repository::clone(url, &dest).with_context(|| format!("Failed to clone {}", url))?;
    Ok(dest)
}

/// Fetch `origin` and fast-forward the checked-out branch to its upstream.
///
/// A detached HEAD, a branch without upstream, or a diverged branch is left as is.
pub fn update(repo: &Repository) -> Result<()> {
    let mut remote = repo
        .find_remote("origin")
        .context("Repository has no 'origin' remote")?;
    remote
        .fetch(&[] as &[&str], None, None)
        .context("Failed to fetch from origin")?;

    let head = repo.head().context("Failed to resolve HEAD")?;
    if !head.is_branch() {
        warn!("HEAD is detached, skipping fast-forward");
        return Ok(());
    }
    let Some(branch_name) = head.shorthand().map(str::to_string) else {
        warn!("Branch name is not valid UTF-8, skipping fast-forward");
        return Ok(());
    };

    let branch = repo.find_branch(&branch_name, BranchType::Local)?;
    let upstream = match branch.upstream() {
        Ok(upstream) => upstream,
        Err(_) => {
            warn!("Branch '{}' has no upstream, skipping fast-forward", branch_name);
            return Ok(());
        }
    };
    let Some(target) = upstream.get().target() else {
        return Ok(());
    };

    let annotated = repo.find_annotated_commit(target)?;
    let (analysis, _) = repo.merge_analysis(&[&annotated])?;
    if analysis.is_up_to_date() {
        info!("Already up to date");
    } else if analysis.is_fast_forward() {
        let target_hex = target.to_string();
        info!("Fast-forwarding '{}' to {}", branch_name, short_commit(&target_hex));
        let refname = format!("refs/heads/{}", branch_name);
        let mut reference = repo.find_reference(&refname)?;
        reference.set_target(target, "halcyon: fast-forward")?;
        repo.set_head(&refname)?;
        repo.checkout_head(Some(CheckoutBuilder::default().force()))?;
    } else {
        warn!(
            "Branch '{}' has diverged from its upstream, leaving it untouched",
            branch_name
        );
    }
    Ok(())
}
