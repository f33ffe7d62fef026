use std::{io, io::Write, sync::Arc};

use crate::{
    app::{
        form::{field_message, FormState, ResourceForm},
        query::{self, ViewState, PAGE_SIZE_OPTIONS},
        store::{CourseStore, ResourceStore, SliceState},
        use_case::{assignment, catalog, review},
    },
    config::env_var::EnvVar,
    domain::{
        datatype::{AuthorId, InstructorId},
        entity::{AttachmentCandidate, Entity, Resource},
        service::{CourseGateway, ResourceGateway},
    },
    error::{
        app::ApplicationError, attachment::FileTypeError, command::CommandError,
        gateway::FetchError, workflow::WorkflowError,
    },
    infra::command::{Command, View, HELP},
};

/// Print a failed result and go back to reading commands.
macro_rules! map_res_err {
    ($result:expr, $out:ident) => {
        match $result {
            Err(err) => {
                err.report($out)?;
                return Ok(Flow::Continue);
            }
            Ok(ok) => ok,
        }
    };
}

/// Asks the user a yes/no question.
pub trait Prompt {
    fn confirm(&mut self, question: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Prompt for F {
    fn confirm(&mut self, question: &str) -> bool {
        self(question)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Error printed to the console.
pub trait Report {
    fn report<W: Write>(&self, out: &mut W) -> io::Result<()>;
}

impl<R> Report for ApplicationError<R> {
    fn report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self {
            ApplicationError::Validation(err) => {
                for field in &err.fields {
                    let name = field.path.trim_start_matches('/');
                    writeln!(out, "  {name}: {}", field_message(field))?;
                }
                Ok(())
            }
            ApplicationError::FileType(err) => err.report(out),
            ApplicationError::Fetch(err) => err.report(out),
            ApplicationError::Transition(err) => writeln!(out, "error: {err}"),
            ApplicationError::Workflow(err) => err.report(out),
        }
    }
}

macro_rules! report_display {
    ($($err:ty),*) => {
        $(
            impl Report for $err {
                fn report<W: Write>(&self, out: &mut W) -> io::Result<()> {
                    writeln!(out, "error: {self}")
                }
            }
        )*
    };
}

report_display!(FetchError, WorkflowError, CommandError, FileTypeError);

/// One console session: the stores, the form and the table state of a user.
pub struct Session<G> {
    resources: ResourceStore<G>,
    courses: CourseStore<G>,
    form: ResourceForm,
    view_state: ViewState,
    view: View,
    student_id: AuthorId,
}

impl<G: ResourceGateway + CourseGateway> Session<G> {
    pub fn new(
        gateway: Arc<G>,
        page_size: usize,
        instructor_id: InstructorId,
        student_id: AuthorId,
    ) -> Self {
        Self {
            resources: ResourceStore::new(gateway.clone()),
            courses: CourseStore::new(gateway),
            form: ResourceForm::new(instructor_id),
            view_state: ViewState::new(page_size),
            view: View::Resources,
            student_id,
        }
    }

    pub fn from_config(gateway: Arc<G>, config: &EnvVar) -> Self {
        Self::new(
            gateway,
            config.page_size,
            config.instructor_id.clone(),
            config.student_id.clone(),
        )
    }

    pub fn resources(&self) -> &ResourceStore<G> {
        &self.resources
    }

    pub fn courses(&self) -> &CourseStore<G> {
        &self.courses
    }

    pub fn form(&self) -> &ResourceForm {
        &self.form
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view_state
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// Load what the current view shows. Failures stay on the store slices.
    pub async fn mount(&mut self) {
        if self.view == View::Resources {
            let _ = self.courses.load().await;
        }
        let _ = review::mount(&mut self.resources).await;
    }

    pub async fn handle<W: Write, P: Prompt>(
        &mut self,
        cmd: Command,
        out: &mut W,
        prompt: &mut P,
    ) -> io::Result<Flow> {
        tracing::debug!(?cmd, view = %self.view, "handling command");

        match cmd {
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
            Command::Open(view) => {
                self.view = view;
                self.mount().await;
                self.show(out)?;
            }
            Command::Show => self.show(out)?,
            Command::Reload => {
                self.mount().await;
                self.show(out)?;
            }
            Command::Courses => {
                if self.courses.courses().is_empty() {
                    let _ = self.courses.load().await;
                }
                self.show_courses(out)?;
            }

            Command::Search(text) => {
                self.view_state.set_search(text);
                self.show_table(out)?;
            }
            Command::Sort(sort) => {
                match sort {
                    Some(sort) => self.view_state.sort_by(sort.key, sort.direction),
                    None => self.view_state.clear_sort(),
                }
                self.show_table(out)?;
            }
            Command::Page(page) => {
                self.view_state.set_page(page);
                self.show_table(out)?;
            }
            Command::PageSize(size) => {
                if !PAGE_SIZE_OPTIONS.contains(&size) {
                    let err = CommandError::InvalidArgument {
                        name: "size",
                        value: size.to_string(),
                    };
                    err.report(out)?;
                    return Ok(Flow::Continue);
                }
                self.view_state.set_page_size(size);
                self.view_state.set_page(1);
                self.show_table(out)?;
            }

            Command::New => {
                self.form.new_resource();
                if self.courses.courses().is_empty() {
                    let _ = self.courses.load().await;
                }
                writeln!(out, "new resource draft")?;
                self.show_courses(out)?;
            }
            Command::Edit(id) => {
                let resource = map_res_err!(
                    self.resources
                        .get(&id)
                        .ok_or(WorkflowError::UnknownResource(id.clone())),
                    out
                );
                self.form.select(resource);
                self.show_form(out)?;
            }
            Command::Set(field, value) => {
                map_res_err!(self.form.set_field(field, value), out);
                self.show_form(out)?;
            }
            Command::Attach { path, mime } => {
                let mut candidate = AttachmentCandidate::from_path(&path);
                if let Some(mime) = mime {
                    candidate.file_type = mime;
                }
                let attachment = map_res_err!(self.form.select_attachment(&candidate), out);
                writeln!(out, "attached {} ({})", attachment.file_name(), attachment.file_type())?;
            }
            Command::Submit => {
                let saved = map_res_err!(self.form.submit(&mut self.resources).await, out);
                writeln!(out, "saved resource {}", saved.ident())?;
            }
            Command::Delete => {
                let removed = map_res_err!(
                    self.form.delete(&mut self.resources, |res| {
                        prompt.confirm(&format!(
                            "Delete resource {} \"{}\"?",
                            res.ident(),
                            res.resource_title()
                        ))
                    }),
                    out
                );
                writeln!(out, "deleted resource {}", removed.ident())?;
            }
            Command::Close => {
                self.form.close();
                writeln!(out, "form closed")?;
            }
            Command::Form => self.show_form(out)?,

            Command::Pending => self.show_pending(out)?,
            Command::Approve(id) => {
                map_res_err!(review::approve(&mut self.resources, &id).await, out);
                writeln!(out, "approved resource {id}")?;
            }
            Command::Reject(id) => {
                map_res_err!(review::reject(&mut self.resources, &id).await, out);
                writeln!(out, "rejected resource {id}")?;
            }
            Command::Reviewers => {
                for candidate in assignment::REVIEWER_CANDIDATES.iter() {
                    writeln!(out, "{:>4}  {}", candidate.id, candidate.name)?;
                }
            }
            Command::Assign(id, reviewer_id) => {
                map_res_err!(
                    assignment::assign(&mut self.resources, &id, &reviewer_id).await,
                    out
                );
                writeln!(out, "assigned reviewer {reviewer_id} to resource {id}")?;
            }

            Command::Like(id) => {
                map_res_err!(catalog::like(&mut self.resources, &id), out);
                self.show_catalog(out)?;
            }
            Command::Dislike(id) => {
                map_res_err!(catalog::dislike(&mut self.resources, &id), out);
                self.show_catalog(out)?;
            }
            Command::Comment(id, text) => {
                let author = self.student_id.clone();
                map_res_err!(catalog::comment(&mut self.resources, &id, author, &text), out);
                self.show_catalog(out)?;
            }
        }

        Ok(Flow::Continue)
    }

    fn show<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self.view {
            View::Resources => self.show_table(out),
            View::Catalog => self.show_catalog(out),
            View::Review => self.show_pending(out),
            View::Assign => self.show_assignments(out),
        }
    }

    fn show_table<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if slice_error(self.resources.slice(), out)? {
            return Ok(());
        }

        let page = query::project(self.resources.resources(), &self.view_state);
        row_header(out)?;
        for resource in &page.rows {
            row(out, resource)?;
        }
        writeln!(
            out,
            "page {} of {} ({} resources, {} per page)",
            page.page,
            page.page_count(),
            page.total,
            page.page_size
        )
    }

    fn show_pending<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if slice_error(self.resources.slice(), out)? {
            return Ok(());
        }

        let pending = review::pending(&self.resources);
        if pending.is_empty() {
            return writeln!(out, "no pending resources");
        }
        row_header(out)?;
        for resource in pending {
            row(out, resource)?;
        }
        Ok(())
    }

    fn show_assignments<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if slice_error(self.resources.slice(), out)? {
            return Ok(());
        }

        let pending = assignment::pending(&self.resources);
        if pending.is_empty() {
            return writeln!(out, "no pending resources");
        }
        for resource in pending {
            let reviewer = resource
                .reviewer_id()
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "-".into());
            writeln!(
                out,
                "{:>6}  {:<30}  reviewer {}",
                resource.ident().to_string(),
                resource.resource_title(),
                reviewer
            )?;
        }
        Ok(())
    }

    fn show_catalog<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if slice_error(self.resources.slice(), out)? {
            return Ok(());
        }

        let approved = catalog::approved(&self.resources);
        if approved.is_empty() {
            return writeln!(out, "no approved resources");
        }
        for resource in approved {
            writeln!(
                out,
                "{:>6}  {} [{}]  +{} -{}",
                resource.ident().to_string(),
                resource.resource_title(),
                resource.course_code(),
                resource.likes(),
                resource.dislikes()
            )?;
            writeln!(out, "        {}", resource.description())?;
            for comment in resource.comments() {
                writeln!(out, "        {}: {}", comment.author_id(), comment.text())?;
            }
        }
        Ok(())
    }

    fn show_courses<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if slice_error(self.courses.slice(), out)? {
            return Ok(());
        }

        for option in ResourceForm::course_options(&self.courses) {
            writeln!(out, "  {:<12} {}", option.value, option.label)?;
        }
        Ok(())
    }

    fn show_form<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let draft = match self.form.state() {
            FormState::Idle => return writeln!(out, "no resource draft is open"),
            FormState::Creating(draft) => {
                writeln!(out, "new resource")?;
                draft
            }
            FormState::Editing { original, draft } => {
                writeln!(out, "editing resource {}", original.ident())?;
                draft
            }
        };

        writeln!(out, "  course:      {}", draft.course_code)?;
        writeln!(out, "  title:       {}", draft.resource_title)?;
        writeln!(out, "  description: {}", draft.description)?;
        for attachment in &draft.attachments {
            writeln!(out, "  attachment:  {}", attachment.file_name())?;
        }
        Ok(())
    }
}

/// Prints the slice error, if any; returns whether one was printed.
fn slice_error<W: Write>(slice: &SliceState, out: &mut W) -> io::Result<bool> {
    match &slice.error {
        Some(message) => {
            writeln!(out, "error: {message}")?;
            Ok(true)
        }
        None => Ok(false),
    }
}

fn row_header<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "{:>6}  {:<30}  {:<10}  {:<8}  {:>5}  {:>8}",
        "id", "title", "course", "status", "likes", "dislikes"
    )
}

fn row<W: Write>(out: &mut W, resource: &Resource) -> io::Result<()> {
    writeln!(
        out,
        "{:>6}  {:<30}  {:<10}  {:<8}  {:>5}  {:>8}",
        resource.ident().to_string(),
        resource.resource_title(),
        resource.course_code(),
        resource.status().as_str(),
        resource.likes(),
        resource.dislikes()
    )
}
