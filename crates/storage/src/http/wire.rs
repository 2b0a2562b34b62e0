use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

use tracker_core::model::{
    Difficulty, LinkKind, Problem, ProblemId, ProblemLinks, Subtopic, SubtopicId, Topic, TopicId,
    UserProfile,
};

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

#[derive(Debug, Deserialize)]
pub(crate) struct TopicDto {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    subtopics: Vec<SubtopicDto>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubtopicDto {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    problems: Vec<ProblemDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProblemDto {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    level: Option<String>,
    #[serde(default)]
    leetcode_link: Option<String>,
    #[serde(default)]
    codeforces_link: Option<String>,
    #[serde(default)]
    youtube_link: Option<String>,
    #[serde(default)]
    article_link: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProgressDto {
    #[serde(default)]
    progress: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProfileEnvelope {
    user: UserDto,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDto {
    #[serde(alias = "username")]
    name: String,
    email: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CompletionRequest<'a> {
    pub problem_id: &'a str,
}

pub(crate) fn map_topics(dtos: Vec<TopicDto>) -> Result<Vec<Topic>, StorageError> {
    dtos.into_iter().map(map_topic).collect()
}

fn map_topic(dto: TopicDto) -> Result<Topic, StorageError> {
    let id: TopicId = dto.id.parse().map_err(ser)?;
    let subtopics = dto
        .subtopics
        .into_iter()
        .map(map_subtopic)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Topic::new(
        id,
        dto.title,
        dto.description.unwrap_or_default(),
        subtopics,
    ))
}

fn map_subtopic(dto: SubtopicDto) -> Result<Subtopic, StorageError> {
    let id: SubtopicId = dto.id.parse().map_err(ser)?;
    let problems = dto
        .problems
        .into_iter()
        .map(map_problem)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Subtopic::new(id, dto.title, problems))
}

fn map_problem(dto: ProblemDto) -> Result<Problem, StorageError> {
    let id: ProblemId = dto.id.parse().map_err(ser)?;

    let difficulty = match dto.level.as_deref() {
        None => None,
        Some(raw) => {
            let parsed = Difficulty::parse(raw);
            if parsed.is_none() {
                warn!(problem = %id, level = raw, "unrecognized difficulty tier");
            }
            parsed
        }
    };

    let mut links = ProblemLinks::new();
    let raw_links = [
        (LinkKind::Practice, dto.leetcode_link),
        (LinkKind::Contest, dto.codeforces_link),
        (LinkKind::Video, dto.youtube_link),
        (LinkKind::Article, dto.article_link),
    ];
    for (kind, raw) in raw_links {
        let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
            continue;
        };
        match Url::parse(raw.trim()) {
            Ok(url) => {
                links.insert(kind, url);
            }
            Err(err) => warn!(problem = %id, %kind, error = %err, "dropping invalid link"),
        }
    }

    Ok(Problem::new(id, dto.name, difficulty, links))
}

pub(crate) fn map_progress(dto: ProgressDto) -> Result<Vec<ProblemId>, StorageError> {
    dto.progress
        .iter()
        .map(|raw| raw.parse::<ProblemId>().map_err(ser))
        .collect()
}

pub(crate) fn map_profile(envelope: ProfileEnvelope) -> UserProfile {
    let user = envelope.user;
    UserProfile {
        name: user.name,
        email: user.email,
        joined_at: user.created_at,
    }
}
