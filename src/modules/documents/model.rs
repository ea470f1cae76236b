pub use docvault_models::documents::{
    AccessLevel, CreateDocumentDto, CreatedDocumentResponse, Document, DocumentListResponse,
    FoundDocumentResponse, UpdateDocumentDto, UpdatedDocumentResponse,
};

pub const DOCUMENT_NOT_FOUND_MESSAGE: &str = "Document Not Found";
pub const DUPLICATE_TITLE_MESSAGE: &str = "Oops!. You already have a document with this title.";
pub const DOCUMENT_CREATED_MESSAGE: &str = "Document created successfully";
pub const DOCUMENT_UPDATED_MESSAGE: &str = "Document updated successfully";
pub const DOCUMENT_DELETED_MESSAGE: &str = "Document deleted successfully";
pub const SEARCH_QUERY_MISSING_MESSAGE: &str = "Search query not found";
