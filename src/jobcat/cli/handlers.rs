use super::print::{print_job, print_jobs, print_messages, print_stats};
use super::AppContext;
use crate::args::{JobArgs, ListArgs};
use jobcat::api::CmdMessage;
use jobcat::config::JobcatConfig;
use jobcat::error::{JobcatError, Result};
use jobcat::model::{clean_list, JobFields, JobPatch};
use jobcat::provider::JsonFileProvider;
use jobcat::query::{JobFilter, SearchFields};
use std::path::{Path, PathBuf};

pub(super) fn list(ctx: &mut AppContext, args: ListArgs) -> Result<()> {
    let query = args.query.clone().unwrap_or_default();
    let filter = JobFilter {
        location: args.location,
        job_type: args.job_type,
        experience: args.experience,
        remote: match (args.remote, args.on_site) {
            (true, _) => Some(true),
            (false, true) => Some(false),
            (false, false) => None,
        },
        skills: args.skills,
    };

    let fields = if args.narrow {
        SearchFields::Narrow
    } else {
        SearchFields::Full
    };

    if args.refresh {
        let path = configured_feed(&ctx.config, None)?;
        let result = ctx
            .api
            .refresh(&JsonFileProvider::new(path), &query, &filter, fields);
        print_jobs(&result.listed_jobs);
        print_messages(&result.messages);
        return Ok(());
    }

    print_jobs(&ctx.api.search(&query, &filter, fields));
    Ok(())
}

pub(super) fn view(ctx: &AppContext, id: &str) -> Result<()> {
    let job = ctx
        .api
        .get_by_id(id)
        .ok_or_else(|| JobcatError::JobNotFound(id.to_string()))?;
    print_job(&job);
    Ok(())
}

pub(super) fn add(ctx: &mut AppContext, args: JobArgs) -> Result<()> {
    let mut fields = JobFields::new(
        args.title.unwrap_or_default(),
        args.company.unwrap_or_default(),
    );
    if let Some(v) = args.location {
        fields.location = v;
    }
    if let Some(v) = args.job_type {
        fields.job_type = v;
    }
    if let Some(v) = args.experience {
        fields.experience = v;
    }
    if let Some(v) = args.salary {
        fields.salary = v;
    }
    if let Some(v) = args.description {
        fields.description = v;
    }
    if let Some(v) = args.requirements {
        fields.requirements = split_list(&v);
    }
    if let Some(v) = args.skills {
        fields.skills = split_list(&v);
    }
    if let Some(v) = args.apply_url {
        fields.apply_url = v;
    }
    if let Some(v) = args.logo {
        fields.logo = v;
    }
    if let Some(v) = args.remote {
        fields.remote = v;
    }

    let result = ctx.api.add(fields)?;
    print_messages(&result.messages);
    Ok(())
}

pub(super) fn update(ctx: &mut AppContext, id: &str, args: JobArgs) -> Result<()> {
    let patch = JobPatch {
        title: args.title,
        company: args.company,
        location: args.location,
        job_type: args.job_type,
        experience: args.experience,
        salary: args.salary,
        description: args.description,
        requirements: args.requirements.as_deref().map(split_list),
        skills: args.skills.as_deref().map(split_list),
        posted: None,
        apply_url: args.apply_url,
        logo: args.logo,
        remote: args.remote,
    };

    let result = ctx.api.update(id, patch)?;
    print_messages(&result.messages);
    Ok(())
}

pub(super) fn delete(ctx: &mut AppContext, ids: &[String]) -> Result<()> {
    let result = if let [id] = ids {
        ctx.api.delete_one(id)?
    } else {
        ctx.api.delete_many(ids)?
    };
    print_messages(&result.messages);
    Ok(())
}

pub(super) fn purge(ctx: &mut AppContext, yes: bool) -> Result<()> {
    if !yes {
        return Err(JobcatError::Api(
            "Purge deletes every job; re-run with --yes to confirm".into(),
        ));
    }
    let result = ctx.api.delete_all()?;
    print_messages(&result.messages);
    Ok(())
}

pub(super) fn sync(ctx: &mut AppContext, from: Option<PathBuf>) -> Result<()> {
    let path = configured_feed(&ctx.config, from)?;
    let provider = JsonFileProvider::new(path);
    let result = ctx
        .api
        .refresh(&provider, "", &JobFilter::default(), SearchFields::Full);
    print_messages(&result.messages);
    if result.has_warnings() {
        return Err(JobcatError::Provider(format!(
            "sync from {} failed",
            provider.path().display()
        )));
    }
    Ok(())
}

pub(super) fn stats(ctx: &AppContext) -> Result<()> {
    print_stats(&ctx.api.stats());
    Ok(())
}

pub(super) fn login(ctx: &AppContext, passcode: &str) -> Result<()> {
    if ctx.api.authenticate(passcode) {
        print_messages(&[CmdMessage::success("Admin session started")]);
        Ok(())
    } else {
        Err(JobcatError::Api("Incorrect passcode".into()))
    }
}

pub(super) fn logout(ctx: &AppContext) -> Result<()> {
    ctx.api.logout();
    print_messages(&[CmdMessage::success("Admin session ended")]);
    Ok(())
}

pub(super) fn status(ctx: &AppContext) -> Result<()> {
    let message = if ctx.api.is_authenticated() {
        CmdMessage::success("Admin session active")
    } else {
        CmdMessage::info("Not logged in")
    };
    print_messages(&[message]);
    Ok(())
}

pub(super) fn config(
    data_dir: &Path,
    config: &JobcatConfig,
    key: Option<String>,
    value: Option<String>,
) -> Result<()> {
    match (key, value) {
        (None, _) => {
            for key in JobcatConfig::keys() {
                println!("{} = {}", key, config.get(key)?);
            }
        }
        (Some(key), None) => println!("{}", config.get(&key)?),
        (Some(key), Some(value)) => {
            // Reload so an env override is not written back to disk.
            let mut stored = JobcatConfig::load(data_dir)?;
            stored.set(&key, &value)?;
            stored.save(data_dir)?;
            print_messages(&[CmdMessage::success(format!("{} set", key))]);
        }
    }
    Ok(())
}

fn configured_feed(config: &JobcatConfig, from: Option<PathBuf>) -> Result<PathBuf> {
    from.or_else(|| config.provider_path.clone()).ok_or_else(|| {
        JobcatError::Config(
            "No provider feed configured; pass --from or set provider-path".into(),
        )
    })
}

fn split_list(raw: &str) -> Vec<String> {
    clean_list(raw.split(','))
}
