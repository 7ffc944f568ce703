//! The daily run: feeds in, Markdown report and PDF out.
//!
//! Sources are processed one after another. A failing source or article is logged and
//! counted; only setup problems (unreadable URL list, bad keyword pattern, unwritable
//! output directory) and the final PDF export end the run with an error.

use crate::error::{PipelineError, Result};
use crate::export::export_pdf;
use crate::feed::{parse_feed, read_url_list, recent_articles, Article, FeedSource};
use crate::filter::{load_keywords, DomainClassifier, DomainQuota, KeywordFilter};
use crate::narrative::Narrator;
use crate::report::{format_report, pdf_file_name, report_file_name, LinkSection, ReportWriter};
use brief_config::BriefConfig;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub date: NaiveDate,
    pub use_keywords: bool,
    pub export_pdf: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub articles_ok: usize,
    pub skipped_by_keyword: usize,
    pub skipped_by_quota: usize,
    pub failures: usize,
    pub sources_ok: usize,
    pub sources_total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub stats: RunStats,
    /// Written only when at least one article made it into the digest.
    pub report_path: Option<PathBuf>,
    pub pdf_path: Option<PathBuf>,
}

pub struct Pipeline<'a> {
    config: &'a BriefConfig,
    source: &'a dyn FeedSource,
    narrator: &'a dyn Narrator,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: &'a BriefConfig,
        source: &'a dyn FeedSource,
        narrator: &'a dyn Narrator,
    ) -> Self {
        Self {
            config,
            source,
            narrator,
        }
    }

    fn keyword_filter(&self, options: &RunOptions) -> Result<KeywordFilter> {
        let filter = &self.config.filter;
        if !options.use_keywords || !filter.enabled {
            return Ok(KeywordFilter::disabled());
        }
        let keywords = load_keywords(filter.keywords_file.as_deref(), &filter.keywords)?;
        info!(count = keywords.len(), mode = ?filter.mode, "keyword filter enabled");
        KeywordFilter::new(&keywords, filter.mode)
    }

    pub fn run(&self, options: &RunOptions) -> Result<RunOutcome> {
        let urls = read_url_list(&self.config.feeds.urls_file)?;
        let keyword_filter = self.keyword_filter(options)?;
        let classifier = DomainClassifier::new(&self.config.filter.domains);
        let mut quota = DomainQuota::new(self.config.filter.max_per_domain, &classifier);
        let link = LinkSection::from(&self.config.convert.sections);

        let out_dir = &self.config.output.dir;
        fs::create_dir_all(out_dir).map_err(|e| PipelineError::io(out_dir, e))?;
        let writer = ReportWriter::new(out_dir.join(report_file_name(options.date)));
        writer.reset()?;

        let mut stats = RunStats {
            sources_total: urls.len(),
            ..RunStats::default()
        };

        for url in &urls {
            info!(%url, "fetching feed");
            let items = match self.source.fetch(url).and_then(|xml| parse_feed(&xml)) {
                Ok(items) => items,
                Err(err) => {
                    warn!(%url, "skipping source: {err}");
                    stats.failures += 1;
                    continue;
                }
            };

            let articles = recent_articles(items, options.date, self.config.feeds.window_days);
            info!(%url, count = articles.len(), "recent articles");

            let mut written = 0;
            for article in articles {
                if self.process_article(
                    &article,
                    &keyword_filter,
                    &classifier,
                    &mut quota,
                    &link,
                    &writer,
                    &mut stats,
                ) {
                    written += 1;
                }
            }
            // A source counts as successful once it contributed an entry.
            if written > 0 {
                stats.sources_ok += 1;
            }
        }

        info!(
            ok = stats.articles_ok,
            keyword_skips = stats.skipped_by_keyword,
            quota_skips = stats.skipped_by_quota,
            failures = stats.failures,
            "sources {}/{} processed",
            stats.sources_ok,
            stats.sources_total
        );

        if stats.articles_ok == 0 {
            warn!("no articles were summarized; no report written");
            return Ok(RunOutcome {
                stats,
                report_path: None,
                pdf_path: None,
            });
        }

        let report_path = writer.path().to_path_buf();
        info!(path = %report_path.display(), "report written");

        let pdf_path = if options.export_pdf {
            let pdf_path = out_dir.join(pdf_file_name(options.date));
            export_pdf(self.config, &report_path, &pdf_path, options.date)?;
            info!(path = %pdf_path.display(), "PDF written");
            Some(pdf_path)
        } else {
            None
        };

        Ok(RunOutcome {
            stats,
            report_path: Some(report_path),
            pdf_path,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn process_article(
        &self,
        article: &Article,
        keyword_filter: &KeywordFilter,
        classifier: &DomainClassifier,
        quota: &mut DomainQuota,
        link: &LinkSection,
        writer: &ReportWriter,
        stats: &mut RunStats,
    ) -> bool {
        let (accepted, hits) = keyword_filter.matches(article);
        if !accepted {
            debug!(title = %article.title, "no keyword match");
            stats.skipped_by_keyword += 1;
            return false;
        }

        let domain = classifier.classify(&article.haystack());
        if !quota.has_room(domain) {
            debug!(title = %article.title, domain, "domain quota reached");
            stats.skipped_by_quota += 1;
            return false;
        }

        let written = self
            .narrator
            .narrate(article)
            .and_then(|narrative| writer.append(&format_report(article, &narrative, link)));
        match written {
            Ok(()) => {
                quota.record(domain);
                stats.articles_ok += 1;
                info!(title = %article.title, domain, hits = ?hits, "article summarized");
                true
            }
            Err(err) => {
                error!(title = %article.title, "article failed: {err}");
                stats.failures += 1;
                false
            }
        }
    }
}
