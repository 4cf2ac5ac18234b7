//! PROPFIND stub
//!
//! Enough of a Multi-Status answer for clients that only probe whether a
//! WebDAV server is present. Depth and the request body are not consulted.

pub const MULTISTATUS_BODY: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<multistatus xmlns="DAV:">
    <response>
        <href>/</href>
        <propstat>
            <status>HTTP/1.1 200 OK</status>
        </propstat>
    </response>
</multistatus>"#;
