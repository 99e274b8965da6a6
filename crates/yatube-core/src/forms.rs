//! Post form: submitted values, cleaning, and field-level errors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Group, Post, PostDraft};

pub const EMPTY_TEXT_ERROR: &str = "You have not written anything, fill in the field!";
pub const INVALID_GROUP_ERROR: &str =
    "Select a valid choice. That choice is not one of the available choices.";

/// Raw values of the post form, as submitted or as pre-filled for editing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub group: Option<String>,
}

/// Field name to error messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl From<&Post> for PostForm {
    fn from(post: &Post) -> Self {
        Self {
            text: post.text.clone(),
            group: post.group_id.map(|id| id.to_string()),
        }
    }
}

impl PostForm {
    /// Validate the submitted values against the available group choices.
    pub fn clean(&self, choices: &[Group]) -> Result<PostDraft, FormErrors> {
        let mut errors = FormErrors::default();

        let text = self.text.trim();
        if text.is_empty() {
            errors.add("text", EMPTY_TEXT_ERROR);
        }

        let group_id = match self.group.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => {
                let chosen = Uuid::parse_str(raw)
                    .ok()
                    .filter(|id| choices.iter().any(|g| g.id == *id));
                if chosen.is_none() {
                    errors.add("group", INVALID_GROUP_ERROR);
                }
                chosen
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(PostDraft {
            text: text.to_string(),
            group_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group() -> Group {
        Group::new(
            "test-title".to_string(),
            "test-slug".to_string(),
            "test-description".to_string(),
        )
    }

    #[test]
    fn test_empty_text_is_rejected() {
        let form = PostForm {
            text: "   ".to_string(),
            group: None,
        };
        let errors = form.clean(&[]).unwrap_err();
        assert_eq!(errors.field("text"), [EMPTY_TEXT_ERROR.to_string()]);
        assert!(errors.field("group").is_empty());
    }

    #[test]
    fn test_valid_form_with_group() {
        let group = group();
        let form = PostForm {
            text: " test-text ".to_string(),
            group: Some(group.id.to_string()),
        };
        let draft = form.clean(std::slice::from_ref(&group)).unwrap();
        assert_eq!(draft.text, "test-text");
        assert_eq!(draft.group_id, Some(group.id));
    }

    #[test]
    fn test_blank_group_means_none() {
        let form = PostForm {
            text: "text".to_string(),
            group: Some(String::new()),
        };
        assert_eq!(form.clean(&[group()]).unwrap().group_id, None);
    }

    #[test]
    fn test_unknown_group_is_rejected() {
        let form = PostForm {
            text: "text".to_string(),
            group: Some(uuid::Uuid::new_v4().to_string()),
        };
        let errors = form.clean(&[group()]).unwrap_err();
        assert_eq!(errors.field("group"), [INVALID_GROUP_ERROR.to_string()]);

        let garbage = PostForm {
            text: String::new(),
            group: Some("1".to_string()),
        };
        let errors = garbage.clean(&[group()]).unwrap_err();
        assert_eq!(errors.field("text").len(), 1);
        assert_eq!(errors.field("group").len(), 1);
    }

    #[test]
    fn test_form_prefilled_from_post() {
        let group = group();
        let post = Post::new(
            uuid::Uuid::new_v4(),
            PostDraft {
                text: "existing".to_string(),
                group_id: Some(group.id),
            },
        );
        let form = PostForm::from(&post);
        assert_eq!(form.text, "existing");
        assert_eq!(form.group, Some(group.id.to_string()));
    }
}
