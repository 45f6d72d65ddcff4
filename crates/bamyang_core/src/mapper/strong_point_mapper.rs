use crate::model::strong_point::StrongPoint;
use crate::store::strong_point_store::StrongPointRecord;

pub fn to_record(strong_point: &StrongPoint) -> StrongPointRecord {
    StrongPointRecord {
        strong_point_id: strong_point.strong_point_id,
        user_id: strong_point.user_id,
        name: strong_point.name.clone(),
    }
}

pub fn to_domain(record: StrongPointRecord) -> StrongPoint {
    StrongPoint {
        strong_point_id: record.strong_point_id,
        name: record.name,
        user_id: record.user_id,
    }
}
