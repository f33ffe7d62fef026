pub mod controller;
pub mod service;

pub mod command {
    use std::str::FromStr;

    use derive_more::Display;

    use crate::{
        app::{
            form::DraftField,
            query::{Sort, SortDirection, SortKey},
        },
        domain::datatype::{ResourceId, ReviewerId},
        error::command::CommandError,
    };

    /// Console views, one per page of the hub.
    #[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
    pub enum View {
        /// Instructor resource table with the create/edit form.
        #[display(fmt = "resources")]
        Resources,
        /// Approved resources with like, dislike and comment.
        #[display(fmt = "catalog")]
        Catalog,
        #[display(fmt = "review")]
        Review,
        #[display(fmt = "assign")]
        Assign,
    }

    impl FromStr for View {
        type Err = CommandError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s {
                "resources" => Ok(Self::Resources),
                "catalog" => Ok(Self::Catalog),
                "review" => Ok(Self::Review),
                "assign" => Ok(Self::Assign),
                _ => Err(CommandError::InvalidArgument {
                    name: "view",
                    value: s.into(),
                }),
            }
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum Command {
        Help,
        Quit,
        Open(View),
        Show,
        Reload,
        Courses,

        Search(String),
        Sort(Option<Sort>),
        Page(usize),
        PageSize(usize),

        New,
        Edit(ResourceId),
        Set(DraftField, String),
        Attach { path: String, mime: Option<String> },
        Submit,
        Delete,
        Close,
        Form,

        Pending,
        Approve(ResourceId),
        Reject(ResourceId),
        Reviewers,
        Assign(ResourceId, ReviewerId),

        Like(ResourceId),
        Dislike(ResourceId),
        Comment(ResourceId, String),
    }

    pub const HELP: &str = "\
views:      open <resources|catalog|review|assign>, show, reload, courses
table:      search <text>, sort <title|description|course|status|likes|dislikes> [asc|desc], sort off,
            page <n>, page-size <5|10|20>
form:       new, edit <id>, set <course|title|description> <text>, attach <path> [mime],
            form, submit, delete, close
review:     pending, approve <id>, reject <id>
assign:     reviewers, assign <id> <reviewer-id>
catalog:    like <id>, dislike <id>, comment <id> <text>
session:    help, quit";

    fn split_word(input: &str) -> (&str, &str) {
        let input = input.trim();
        match input.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (input, ""),
        }
    }

    fn required<'a>(value: &'a str, name: &'static str) -> Result<&'a str, CommandError> {
        if value.is_empty() {
            return Err(CommandError::MissingArgument(name));
        }
        Ok(value)
    }

    fn number(value: &str, name: &'static str) -> Result<usize, CommandError> {
        required(value, name)?
            .parse()
            .map_err(|_| CommandError::InvalidArgument {
                name,
                value: value.into(),
            })
    }

    fn resource_id(value: &str) -> Result<ResourceId, CommandError> {
        Ok(ResourceId::parse(required(value, "id")?))
    }

    fn id_and_text(args: &str, name: &'static str) -> Result<(ResourceId, String), CommandError> {
        let (id, text) = split_word(args);
        Ok((resource_id(id)?, required(text, name)?.to_owned()))
    }

    fn sort(args: &str) -> Result<Option<Sort>, CommandError> {
        let (key, direction) = split_word(required(args, "field")?);
        if key == "off" {
            return Ok(None);
        }

        let direction = match direction {
            "" => SortDirection::default(),
            direction => direction.parse()?,
        };
        Ok(Some(Sort {
            key: key.parse::<SortKey>()?,
            direction,
        }))
    }

    impl FromStr for Command {
        type Err = CommandError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            let (name, args) = split_word(s);

            let cmd = match name {
                "help" | "?" => Self::Help,
                "quit" | "exit" => Self::Quit,
                "open" => Self::Open(required(args, "view")?.parse()?),
                "show" | "ls" => Self::Show,
                "reload" => Self::Reload,
                "courses" => Self::Courses,

                "search" => Self::Search(args.to_owned()),
                "sort" => Self::Sort(sort(args)?),
                "page" => Self::Page(number(args, "page")?),
                "page-size" => Self::PageSize(number(args, "size")?),

                "new" => Self::New,
                "edit" => Self::Edit(resource_id(args)?),
                "set" => {
                    let (field, value) = split_word(args);
                    Self::Set(required(field, "field")?.parse()?, value.to_owned())
                }
                "attach" => {
                    let (path, mime) = split_word(args);
                    Self::Attach {
                        path: required(path, "path")?.to_owned(),
                        mime: (!mime.is_empty()).then(|| mime.to_owned()),
                    }
                }
                "submit" => Self::Submit,
                "delete" => Self::Delete,
                "close" => Self::Close,
                "form" => Self::Form,

                "pending" => Self::Pending,
                "approve" => Self::Approve(resource_id(args)?),
                "reject" => Self::Reject(resource_id(args)?),
                "reviewers" => Self::Reviewers,
                "assign" => {
                    let (id, reviewer) = split_word(args);
                    Self::Assign(
                        resource_id(id)?,
                        ReviewerId::parse(required(reviewer, "reviewer-id")?),
                    )
                }

                "like" => Self::Like(resource_id(args)?),
                "dislike" => Self::Dislike(resource_id(args)?),
                "comment" => {
                    let (id, text) = id_and_text(args, "text")?;
                    Self::Comment(id, text)
                }

                other => return Err(CommandError::Unknown(other.into())),
            };

            Ok(cmd)
        }
    }

}
