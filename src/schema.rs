// Mirrors the table created by `db::CREATE_VECTOR_RECORDS`.

diesel::table! {
    vector_records (collection, record_id) {
        collection -> Text,
        record_id -> Text,
        vector -> Text,
        task -> Text,
        result -> Text,
        created_at -> Text,
        updated_at -> Text,
    }
}
