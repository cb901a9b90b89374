//! Book instance (copy) workflows

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookInstance, BookInstanceView, Entity, Record},
    repository::Repository,
    store::Query,
    validation::{validate, FieldError, Submission, Validated},
    views::{
        book_choices, status_choices, BookInstanceDeleteContext, BookInstanceDetailContext,
        BookInstanceFormContext, BookInstanceListContext, Page,
    },
};

use super::{
    delete_if_unreferenced,
    lookup::{Dependents, LookupService},
};

#[derive(Clone)]
pub struct BookInstanceService {
    repository: Repository,
    lookup: LookupService,
}

impl BookInstanceService {
    pub fn new(repository: Repository, lookup: LookupService) -> Self {
        Self { repository, lookup }
    }

    /// Every copy with its book, sorted by book title
    pub async fn list(&self) -> AppResult<Page<BookInstanceListContext>> {
        let instances = self.repository.book_instances.find_all(&Query::default()).await?;
        let mut bookinstance_list = self.lookup.populate_book_instances(instances).await?;
        bookinstance_list.sort_by(|a, b| a.book_title().cmp(b.book_title()));
        Ok(Page::render(
            "bookinstance_list",
            "Book Instance List",
            BookInstanceListContext { bookinstance_list },
        ))
    }

    pub async fn detail(&self, id: &str) -> AppResult<Page<BookInstanceDetailContext>> {
        let bookinstance = self
            .lookup
            .book_instance_detail(id)
            .await?
            .ok_or_else(|| AppError::not_found(BookInstance::LABEL))?;
        Ok(Page::render(
            "bookinstance_detail",
            format!("Copy: {}", bookinstance.book_title()),
            BookInstanceDetailContext { bookinstance },
        ))
    }

    pub async fn create_form(&self) -> AppResult<Page<BookInstanceFormContext>> {
        let books = self.repository.books.list_titles().await?;
        Ok(form_page("Create BookInstance", None, None, None, &books, Vec::new()))
    }

    pub async fn create(&self, submission: &Submission) -> AppResult<Page<BookInstanceFormContext>> {
        let instance = match self.validate(submission).await? {
            Validated::Valid(instance) => instance,
            Validated::Invalid { draft, errors } => {
                return self
                    .form_with_errors("Create BookInstance", None, draft, errors)
                    .await;
            }
        };

        let saved = self.repository.book_instances.save(&instance).await?;
        tracing::info!("Book instance created: id={} book={}", saved.id, saved.data.book);
        Ok(Page::redirect(saved.url()))
    }

    pub async fn update_form(&self, id: &str) -> AppResult<Page<BookInstanceFormContext>> {
        let (instance, books) = self.lookup.book_instance_for_update(id).await?;
        let instance = instance.ok_or_else(|| AppError::not_found(BookInstance::LABEL))?;
        let data = instance.data.clone();
        let current = self.lookup.populate_book_instance(instance).await?;
        Ok(form_page(
            "Update BookInstance",
            Some(current.id.clone()),
            Some(data),
            Some(current),
            &books,
            Vec::new(),
        ))
    }

    pub async fn update(&self, id: &str, submission: &Submission) -> AppResult<Page<BookInstanceFormContext>> {
        let instance = match self.validate(submission).await? {
            Validated::Valid(instance) => instance,
            Validated::Invalid { draft, errors } => {
                return self
                    .form_with_errors("Update BookInstance", Some(id.to_string()), draft, errors)
                    .await;
            }
        };

        let updated = self.repository.book_instances.update_by_id(id, &instance).await?;
        tracing::info!("Book instance updated: id={}", updated.id);
        Ok(Page::redirect(updated.url()))
    }

    pub async fn delete_form(&self, id: &str) -> AppResult<Page<BookInstanceDeleteContext>> {
        Ok(match self.lookup.book_instance_detail(id).await? {
            Some(bookinstance) => delete_page(bookinstance),
            None => Page::redirect(BookInstance::LIST_URL),
        })
    }

    /// Copies have no dependents, so this always deletes when the copy exists
    pub async fn delete(&self, id: &str) -> AppResult<Page<BookInstanceDeleteContext>> {
        let found = Dependents::<Record<BookInstance>, ()> {
            entity: self.repository.book_instances.find_by_id(id).await?,
            dependents: Vec::new(),
        };
        delete_if_unreferenced(&self.repository.book_instances, id, found, |_, _| {
            Page::redirect(BookInstance::LIST_URL)
        })
        .await
    }

    /// Form rules, then the book reference must resolve
    async fn validate(&self, submission: &Submission) -> AppResult<Validated<BookInstance>> {
        let validated = validate::<BookInstance>(submission);
        let Validated::Valid(instance) = validated else {
            return Ok(validated);
        };
        if self.repository.books.exists(&instance.book).await? {
            return Ok(Validated::Valid(instance));
        }
        let errors = vec![FieldError::new("book", "Book not found", &instance.book)];
        Ok(Validated::Invalid {
            draft: instance,
            errors,
        })
    }

    async fn form_with_errors(
        &self,
        title: &str,
        id: Option<String>,
        draft: BookInstance,
        errors: Vec<FieldError>,
    ) -> AppResult<Page<BookInstanceFormContext>> {
        let books = self.repository.books.list_titles().await?;
        Ok(form_page(title, id, Some(draft), None, &books, errors))
    }
}

fn form_page(
    title: &str,
    id: Option<String>,
    bookinstance: Option<BookInstance>,
    current: Option<BookInstanceView>,
    books: &[Record<Book>],
    errors: Vec<FieldError>,
) -> Page<BookInstanceFormContext> {
    // a rejected status leaves nothing selected
    let status_rejected = errors.iter().any(|e| e.field == "status");
    let (book_list, statuses) = match bookinstance {
        Some(ref instance) if status_rejected => (book_choices(books, &instance.book), status_choices(None)),
        Some(ref instance) => (book_choices(books, &instance.book), status_choices(Some(instance.status))),
        None => (book_choices(books, ""), status_choices(Some(Default::default()))),
    };
    Page::render(
        "bookinstance_form",
        title,
        BookInstanceFormContext {
            id,
            bookinstance,
            current,
            book_list,
            statuses,
            errors,
        },
    )
}

fn delete_page(bookinstance: BookInstanceView) -> Page<BookInstanceDeleteContext> {
    Page::render(
        "bookinstance_delete",
        "Delete BookInstance",
        BookInstanceDeleteContext { bookinstance },
    )
}
