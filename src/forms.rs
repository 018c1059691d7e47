// Submitted form payloads.
use poem_openapi::Object;
use validator::Validate;

use crate::status::PageStatus;

pub const NAME_MAX: usize = 50;
pub const IMAGEFILE_MAX: usize = 80;
pub const TITLE_MAX: usize = 255;
pub const DESCRIPTION_MAX: usize = 255;
pub const RANK_FOCUS_MAX: i32 = 10;
pub const RANK_PINNED_MAX: i32 = 5;
pub const TAG_NAME_MAX: usize = 50;

/// Create/edit submission of a page. Both pages submit the whole form.
#[derive(Debug, Clone, Default, Object, Validate)]
pub struct PageForm {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(length(max = 80))]
    pub imagefile: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1, max = 255))]
    pub description: String,
    pub status: Option<PageStatus>,
    /// Ids of related tags; order and duplicates are ignored.
    #[oai(default)]
    pub tags: Vec<i32>,
    #[oai(default)]
    pub is_focus: bool,
    #[oai(default)]
    pub is_pinned: bool,
    #[validate(range(min = 1, max = 10))]
    pub rank_focus: Option<i32>,
    #[validate(range(min = 1, max = 5))]
    pub rank_pinned: Option<i32>,
}

impl PageForm {
    /// Trims text input and turns blank optional text into `None`, the way
    /// submitted form input is cleaned before validation.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.title = self.title.trim().to_string();
        self.description = self.description.trim().to_string();
        self.imagefile = self
            .imagefile
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty());
        self.tags.sort_unstable();
        self.tags.dedup();
        self
    }
}

#[derive(Debug, Clone, Object, Validate)]
pub struct TagForm {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
}

#[cfg(test)]
pub(crate) fn sample_form(title: &str) -> PageForm {
    PageForm {
        name: "landing".to_string(),
        title: title.to_string(),
        description: format!("About {title}"),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{PageResource, Resource};
    use rstest::rstest;

    fn errors_for(form: PageForm) -> Vec<String> {
        match form.normalized().validate() {
            Ok(()) => Vec::new(),
            Err(errors) => errors.field_errors().keys().map(|k| k.to_string()).collect(),
        }
    }

    #[rstest]
    fn test_valid_form_passes() {
        let form = PageForm {
            imagefile: Some("hero.png".into()),
            status: Some(PageStatus::Published),
            is_focus: true,
            rank_focus: Some(10),
            is_pinned: true,
            rank_pinned: Some(1),
            ..sample_form("Welcome")
        };
        assert!(errors_for(form).is_empty());
    }

    #[rstest]
    #[case::name(PageForm { name: String::new(), ..sample_form("t") }, "name")]
    #[case::title(PageForm { title: "   ".into(), ..sample_form("t") }, "title")]
    #[case::description(PageForm { description: String::new(), ..sample_form("t") }, "description")]
    fn test_required_fields_reject_blank(#[case] form: PageForm, #[case] field: &str) {
        assert_eq!(errors_for(form), vec![field.to_string()]);
    }

    #[rstest]
    #[case("name", NAME_MAX)]
    #[case("imagefile", IMAGEFILE_MAX)]
    #[case("title", TITLE_MAX)]
    #[case("description", DESCRIPTION_MAX)]
    fn test_max_lengths(#[case] field: &str, #[case] limit: usize) {
        let set = |value: String| {
            let mut form = sample_form("t");
            match field {
                "name" => form.name = value,
                "imagefile" => form.imagefile = Some(value),
                "title" => form.title = value,
                _ => form.description = value,
            }
            form
        };

        assert!(errors_for(set("x".repeat(limit))).is_empty());
        assert_eq!(errors_for(set("x".repeat(limit + 1))), vec![field.to_string()]);
    }

    #[rstest]
    fn test_form_descriptor_declares_the_enforced_limits() {
        let form = PageResource.form();
        for (field, limit) in [
            ("name", NAME_MAX),
            ("imagefile", IMAGEFILE_MAX),
            ("title", TITLE_MAX),
            ("description", DESCRIPTION_MAX),
        ] {
            assert_eq!(form.field(field).unwrap().max_length_limit(), Some(limit));
        }
        assert_eq!(
            form.field("rank_focus").unwrap().options().len(),
            RANK_FOCUS_MAX as usize
        );
        assert_eq!(
            form.field("rank_pinned").unwrap().options().len(),
            RANK_PINNED_MAX as usize
        );
    }

    #[rstest]
    #[case(Some(0), None, "rank_focus")]
    #[case(Some(11), None, "rank_focus")]
    #[case(None, Some(0), "rank_pinned")]
    #[case(None, Some(6), "rank_pinned")]
    fn test_rank_out_of_choices(
        #[case] rank_focus: Option<i32>,
        #[case] rank_pinned: Option<i32>,
        #[case] field: &str,
    ) {
        let form = PageForm {
            rank_focus,
            rank_pinned,
            ..sample_form("t")
        };
        assert_eq!(errors_for(form), vec![field.to_string()]);
    }

    #[rstest]
    fn test_normalized_cleans_input() {
        let form = PageForm {
            name: "  about ".into(),
            imagefile: Some("   ".into()),
            tags: vec![3, 1, 3],
            ..sample_form("t")
        }
        .normalized();

        assert_eq!(form.name, "about");
        assert_eq!(form.imagefile, None);
        assert_eq!(form.tags, vec![1, 3]);
    }

    #[rstest]
    fn test_tag_name_limits() {
        assert!(TagForm { name: String::new() }.validate().is_err());
        assert!(TagForm { name: "x".repeat(TAG_NAME_MAX + 1) }.validate().is_err());
        assert!(TagForm { name: "news".into() }.validate().is_ok());
    }
}
