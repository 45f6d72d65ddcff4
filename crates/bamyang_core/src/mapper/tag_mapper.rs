use crate::model::tag::Tag;
use crate::store::tag_store::TagRecord;

pub fn to_record(tag: &Tag) -> TagRecord {
    TagRecord {
        tag_id: tag.tag_id,
        name: tag.name.clone(),
        parent_tag_id: tag.parent_tag_id,
        user_id: tag.user_id,
    }
}

pub fn to_domain(record: TagRecord) -> Tag {
    Tag {
        tag_id: record.tag_id,
        name: record.name,
        parent_tag_id: record.parent_tag_id,
        user_id: record.user_id,
    }
}
