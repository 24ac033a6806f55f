use atelier_models::contact::ContactMessage;
use atelier_persistence_contracts::contact::ContactMessageRepository;
use bb8_postgres::tokio_postgres::Row;
use uuid::Uuid;

use crate::{columns, placeholders, PostgresTransaction};

#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresContactMessageRepository;

columns!(contact_message as "m": "id", "name", "email", "message", "phone", "company", "created_at");

impl ContactMessageRepository<PostgresTransaction> for PostgresContactMessageRepository {
    async fn create(
        &self,
        txn: &mut PostgresTransaction,
        message: &ContactMessage,
    ) -> anyhow::Result<()> {
        txn.txn()
            .execute(
                &format!(
                    "insert into contact_messages ({CONTACT_MESSAGE_COL_NAMES}) values ({})",
                    placeholders(CONTACT_MESSAGE_CNT)
                ),
                &[
                    &*message.id,
                    &*message.name,
                    &message.email.as_str(),
                    &*message.message,
                    &message.phone.as_deref(),
                    &message.company.as_deref(),
                    &message.created_at,
                ],
            )
            .await
            .map(|_| ())
            .map_err(Into::into)
    }

    async fn list(&self, txn: &mut PostgresTransaction) -> anyhow::Result<Vec<ContactMessage>> {
        txn.txn()
            .query(
                &format!(
                    "select {CONTACT_MESSAGE_COLS} from contact_messages m order by m.created_at asc"
                ),
                &[],
            )
            .await
            .map_err(Into::into)
            .and_then(|rows| rows.iter().map(decode_contact_message).collect())
    }
}

fn decode_contact_message(row: &Row) -> anyhow::Result<ContactMessage> {
    let mut offset = 0;
    let mut idx = || {
        offset += 1;
        offset - 1
    };

    Ok(ContactMessage {
        id: row.get::<_, Uuid>(idx()).into(),
        name: row.get::<_, String>(idx()).try_into()?,
        email: row.get::<_, String>(idx()).parse()?,
        message: row.get::<_, String>(idx()).try_into()?,
        phone: row
            .get::<_, Option<String>>(idx())
            .map(TryInto::try_into)
            .transpose()?,
        company: row
            .get::<_, Option<String>>(idx())
            .map(TryInto::try_into)
            .transpose()?,
        created_at: row.get(idx()),
    })
}
