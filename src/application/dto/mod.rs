// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// PRINCIPLES:
// - DTOs are client-friendly, camelCase JSON
// - DTOs are simple, serializable structs
// - Response DTOs convert FROM domain entities only
// - Request DTOs carry raw input; services validate it

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Book, BookReference, ExternalBookRecord, Page, ReviewDetails, User};
use crate::error::AppResult;
use crate::integrations::ExternalSearchResult;
use crate::services::{AuthSession, CanonicalBook, NewBookInput, RegisterUser, UpdateProfile};

// ============================================================================
// BOOK DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    pub id: String,
    pub external_id: Option<String>,
    pub title: String,
    pub author: String,
    pub description: String,
    pub genre: String,
    pub isbn: String,
    pub publisher: Option<String>,
    pub language: String,
    pub published_date: Option<String>,
    pub cover_image: Option<String>,
    pub page_count: u32,
    pub added_by: Option<String>,
    pub created_at: String,
}

impl From<Book> for BookDto {
    fn from(book: Book) -> Self {
        Self {
            id: book.id.to_string(),
            external_id: book.external_id,
            title: book.title,
            author: book.author,
            description: book.description,
            genre: book.genre,
            isbn: book.isbn,
            publisher: book.publisher,
            language: book.language,
            published_date: book.published_date.map(|d| d.to_string()),
            cover_image: book.cover_image,
            page_count: book.page_count,
            added_by: book.added_by.map(|id| id.to_string()),
            created_at: book.created_at.to_rfc3339(),
        }
    }
}

/// Provider book that may not be in the local catalog yet
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalBookDto {
    pub external_id: String,
    pub title: String,
    pub author: String,
    pub description: String,
    pub genre: String,
    pub isbn: String,
    pub publisher: String,
    pub language: String,
    pub published_date: Option<String>,
    pub cover_image: Option<String>,
    pub page_count: u32,
}

impl From<ExternalBookRecord> for ExternalBookDto {
    fn from(record: ExternalBookRecord) -> Self {
        Self {
            external_id: record.external_id,
            title: record.title,
            author: record.author,
            description: record.description,
            genre: record.genre,
            isbn: record.isbn,
            publisher: record.publisher,
            language: record.language,
            published_date: record.published_date.map(|d| d.to_string()),
            cover_image: record.cover_image,
            page_count: record.page_count,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalBookDto {
    pub local: Option<BookDto>,
    pub external: Option<ExternalBookDto>,
    pub imported: bool,
}

impl From<CanonicalBook> for CanonicalBookDto {
    fn from(canonical: CanonicalBook) -> Self {
        Self {
            local: canonical.local.map(BookDto::from),
            external: canonical.external.map(ExternalBookDto::from),
            imported: canonical.imported,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultDto {
    pub items: Vec<ExternalBookDto>,
    pub total: u64,
}

impl From<ExternalSearchResult> for SearchResultDto {
    fn from(result: ExternalSearchResult) -> Self {
        Self {
            items: result.items.into_iter().map(ExternalBookDto::from).collect(),
            total: result.total,
        }
    }
}

/// Admin-only local book
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookDto {
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub isbn: Option<String>,
    pub publisher: Option<String>,
    pub language: Option<String>,
    pub published_date: Option<NaiveDate>,
    pub cover_image: Option<String>,
    pub page_count: Option<u32>,
}

impl From<CreateBookDto> for NewBookInput {
    fn from(dto: CreateBookDto) -> Self {
        Self {
            title: dto.title,
            author: dto.author,
            description: dto.description,
            genre: dto.genre,
            isbn: dto.isbn,
            publisher: dto.publisher,
            language: dto.language,
            published_date: dto.published_date,
            cover_image: dto.cover_image,
            page_count: dto.page_count,
        }
    }
}

// ============================================================================
// BOOK REFERENCE DTO
// ============================================================================

/// `{ "kind": "local" | "external", "id": "..." }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookReferenceDto {
    pub kind: String,
    pub id: String,
}

impl BookReferenceDto {
    pub fn parse(&self) -> AppResult<BookReference> {
        BookReference::parse(&self.kind, &self.id)
    }
}

// ============================================================================
// REVIEW DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDto {
    pub id: String,
    pub rating: u8,
    pub comment: String,
    pub created_at: String,
    pub user: ReviewUserDto,
    pub book: ReviewBookDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewUserDto {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewBookDto {
    pub id: String,
    pub title: String,
    pub author: String,
    pub cover_image: Option<String>,
}

impl From<ReviewDetails> for ReviewDto {
    fn from(details: ReviewDetails) -> Self {
        Self {
            id: details.review.id.to_string(),
            rating: details.review.rating,
            comment: details.review.comment,
            created_at: details.review.created_at.to_rfc3339(),
            user: ReviewUserDto {
                id: details.review.user_id.to_string(),
                username: details.username,
            },
            book: ReviewBookDto {
                id: details.review.book_id.to_string(),
                title: details.book_title,
                author: details.book_author,
                cover_image: details.book_cover_image,
            },
        }
    }
}

/// `rating` stays signed so out-of-range values reach validation
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitReviewDto {
    pub book: BookReferenceDto,
    pub rating: i64,
    pub comment: String,
}

// ============================================================================
// USER DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub username: String,
    pub email: String,
    pub bio: String,
    pub role: String,
    pub created_at: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username,
            email: user.email,
            bio: user.bio,
            role: user.role.to_string(),
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthDto {
    pub token: String,
    pub user: UserDto,
}

impl From<AuthSession> for AuthDto {
    fn from(session: AuthSession) -> Self {
        Self {
            token: session.token,
            user: UserDto::from(session.user),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterDto {
    pub username: String,
    pub email: String,
    pub password: String,
    pub bio: Option<String>,
}

impl From<RegisterDto> for RegisterUser {
    fn from(dto: RegisterDto) -> Self {
        Self {
            username: dto.username,
            email: dto.email,
            password: dto.password,
            bio: dto.bio,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginDto {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileDto {
    pub username: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
}

impl From<UpdateProfileDto> for UpdateProfile {
    fn from(dto: UpdateProfileDto) -> Self {
        Self {
            username: dto.username,
            email: dto.email,
            bio: dto.bio,
        }
    }
}

// ============================================================================
// PAGINATION & QUERY DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDto<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl<T> PageDto<T> {
    pub fn from_page<U>(page: Page<U>) -> Self
    where
        T: From<U>,
    {
        let (current, total_pages) = (page.current_page(), page.total_pages());
        let page = page.map(T::from);
        Self {
            total: page.total,
            limit: page.limit,
            page: current,
            total_pages,
            items: page.items,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewListQuery {
    pub book_kind: Option<String>,
    pub book_id: Option<String>,
    pub user_id: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewBook, Review, Role, UserId};

    #[test]
    fn test_book_dto_is_camel_case() {
        let book = Book::create(NewBook {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            external_id: Some("g1".to_string()),
            page_count: Some(412),
            ..NewBook::default()
        });
        let json = serde_json::to_value(BookDto::from(book)).unwrap();

        assert_eq!(json["externalId"], "g1");
        assert_eq!(json["pageCount"], 412);
        assert!(json.get("external_id").is_none());
    }

    #[test]
    fn test_user_dto_has_no_password_hash() {
        let user = User::new(
            "reader".to_string(),
            "reader@example.com".to_string(),
            "salt$secret".to_string(),
            Role::User,
        );
        let json = serde_json::to_string(&UserDto::from(user)).unwrap();
        assert!(!json.contains("secret"));
        assert!(json.contains("\"role\":\"user\""));
    }

    #[test]
    fn test_review_dto_nests_user_and_book() {
        let user_id = UserId::new();
        let details = ReviewDetails {
            review: Review::new(crate::domain::BookId::new(), user_id, 4, "Great pacing overall".into()),
            username: "reader".to_string(),
            book_title: "Dune".to_string(),
            book_author: "Frank Herbert".to_string(),
            book_cover_image: None,
        };
        let json = serde_json::to_value(ReviewDto::from(details)).unwrap();
        assert_eq!(json["user"]["username"], "reader");
        assert_eq!(json["user"]["id"], user_id.to_string());
        assert_eq!(json["book"]["title"], "Dune");
        assert_eq!(json["rating"], 4);
    }

    #[test]
    fn test_page_dto_counts_pages() {
        let page = Page {
            items: vec![1u8, 2],
            total: 5,
            offset: 2,
            limit: 2,
        };
        let dto: PageDto<u64> = PageDto::from_page(page);
        assert_eq!(dto.page, 2);
        assert_eq!(dto.total_pages, 3);
        assert_eq!(dto.items, vec![1, 2]);
    }
}
