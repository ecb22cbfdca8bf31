//! 页面渲染
//!
//! Templates live in `templates/` and are compiled in. Names ending in
//! `.html` are auto-escaped by minijinja.

use minijinja::{context, Environment};

use super::probe::model::ProbeReport;

pub const APP_TITLE: &str = "Web Scaffold with MySQL";

/// Values shown on the landing page
pub struct IndexInfo<'a> {
    pub version: &'a str,
    pub database_host: &'a str,
    pub database_name: &'a str,
}

pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn load() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("base.html", include_str!("../../templates/base.html"))?;
        env.add_template("index.html", include_str!("../../templates/index.html"))?;
        env.add_template("db_test.html", include_str!("../../templates/db_test.html"))?;
        env.add_global("app_title", APP_TITLE);
        Ok(Self { env })
    }

    pub fn index_page(&self, info: &IndexInfo<'_>) -> Result<String, minijinja::Error> {
        self.env.get_template("index.html")?.render(context! {
            version => info.version,
            database_host => info.database_host,
            database_name => info.database_name,
        })
    }

    pub fn db_test_page(&self, outcome: Result<&ProbeReport, &str>) -> Result<String, minijinja::Error> {
        let (report, error) = match outcome {
            Ok(report) => (Some(report), None),
            Err(message) => (None, Some(message)),
        };
        self.env
            .get_template("db_test.html")?
            .render(context! { report, error })
    }
}
