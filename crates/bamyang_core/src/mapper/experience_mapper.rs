use super::timestamp_from_record;
use crate::model::experience::{Experience, ExperienceContent};
use crate::model::timestamp::to_epoch_ms;
use crate::repo::RepoResult;
use crate::store::experience_store::{
    ExperienceContentRecord, ExperienceRecord, ExperienceStrongPointRecord,
};

pub fn to_record(experience: &Experience) -> ExperienceRecord {
    ExperienceRecord {
        experience_id: experience.experience_id,
        user_id: experience.user_id,
        title: experience.title.clone(),
        parent_tag_id: experience.parent_tag_id,
        child_tag_id: experience.child_tag_id,
        started_at: to_epoch_ms(experience.started_at),
        ended_at: to_epoch_ms(experience.ended_at),
        created_at: to_epoch_ms(experience.created_at),
        updated_at: to_epoch_ms(experience.updated_at),
        contents: experience
            .contents
            .iter()
            .zip(0_i64..)
            .map(|(content, position)| ExperienceContentRecord {
                position,
                question: content.question.clone(),
                answer: content.answer.clone(),
            })
            .collect(),
        strong_points: experience
            .strong_point_ids
            .iter()
            .zip(0_i64..)
            .map(|(&strong_point_id, position)| ExperienceStrongPointRecord {
                strong_point_id,
                position,
            })
            .collect(),
    }
}

/// Child rows are expected in `position` order, as the store returns them.
pub fn to_domain(record: ExperienceRecord) -> RepoResult<Experience> {
    Ok(Experience {
        experience_id: record.experience_id,
        user_id: record.user_id,
        title: record.title,
        contents: record
            .contents
            .into_iter()
            .map(|content| ExperienceContent::new(content.question, content.answer))
            .collect(),
        strong_point_ids: record
            .strong_points
            .into_iter()
            .map(|link| link.strong_point_id)
            .collect(),
        parent_tag_id: record.parent_tag_id,
        child_tag_id: record.child_tag_id,
        started_at: timestamp_from_record(record.started_at, "experience.started_at")?,
        ended_at: timestamp_from_record(record.ended_at, "experience.ended_at")?,
        created_at: timestamp_from_record(record.created_at, "experience.created_at")?,
        updated_at: timestamp_from_record(record.updated_at, "experience.updated_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::{to_domain, to_record};
    use crate::model::experience::{Experience, ExperienceContent, ExperienceDraft};
    use crate::repo::RepoError;
    use chrono::NaiveDate;
    use uuid::Uuid;

    #[test]
    fn child_positions_follow_input_order() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let strong_points = vec![Uuid::new_v4(), Uuid::new_v4()];
        let experience = Experience::create(
            Uuid::new_v4(),
            ExperienceDraft {
                title: "intern".to_string(),
                contents: vec![
                    ExperienceContent::new("q1", "a1"),
                    ExperienceContent::new("q2", "a2"),
                ],
                strong_point_ids: strong_points.clone(),
                parent_tag_id: Some(Uuid::new_v4()),
                child_tag_id: None,
                started_at: day.and_hms_opt(9, 0, 0).unwrap(),
                ended_at: day.and_hms_opt(18, 0, 0).unwrap(),
            },
        )
        .unwrap();

        let record = to_record(&experience);
        assert_eq!(record.contents[1].position, 1);
        assert_eq!(record.contents[1].question, "q2");
        assert_eq!(record.strong_points[0].strong_point_id, strong_points[0]);

        assert_eq!(to_domain(record).unwrap(), experience);
    }

    #[test]
    fn out_of_range_timestamp_is_invalid_data() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let experience = Experience::create(
            Uuid::new_v4(),
            ExperienceDraft {
                title: "t".to_string(),
                contents: Vec::new(),
                strong_point_ids: Vec::new(),
                parent_tag_id: None,
                child_tag_id: None,
                started_at: day.and_hms_opt(9, 0, 0).unwrap(),
                ended_at: day.and_hms_opt(9, 0, 0).unwrap(),
            },
        )
        .unwrap();
        let mut record = to_record(&experience);
        record.created_at = i64::MAX;

        let err = to_domain(record).unwrap_err();
        assert!(matches!(err, RepoError::InvalidData(message) if message.contains("created_at")));
    }
}
