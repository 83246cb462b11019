/*!

This is the long-form manual for `legislative_tally` and `legtally`.

## Input formats

The program reads four tables:

| table          | required columns                                 |
|----------------|--------------------------------------------------|
| `bills`        | `id`, `title`, `sponsor_id`                      |
| `legislators`  | `id`, `name`                                     |
| `votes`        | `id`, `bill_id`                                  |
| `vote_results` | `id`, `legislator_id`, `vote_id`, `vote_type`    |

Other columns are ignored. Integer columns also accept integer-valued decimals
(`12.0`), as written by spreadsheet programs and dataframe exports. The
`sponsor_id` column may be empty (or `NaN`, `null`, `None`) for bills without
a sponsor. A decimal too large for a 64-bit integer is an error.

Leading and trailing spaces are removed from every cell, including names and
titles. Reports produced by tools that keep those spaces will differ from
ours on such rows when used with `--reference`.

In Excel workbooks, dates, booleans and error cells are accepted in the extra
columns. They are an error in an integer column.

In `vote_results`, `vote_type` is `1` for a vote in support of the bill and
`2` for a vote against it. Other values are accepted: the legislator is then
listed in the report, but the vote is not counted.

The following providers are supported:
* `csv` (default): one Comma Separated Values file per table, with a header row.
  By default the files are `bills.csv`, `legislators.csv`, `votes.csv` and
  `vote_results.csv` in the `data` directory.
* `xlsx`: one Excel workbook with one worksheet per table. By default the
  worksheets are named after the tables.

## Output

Two CSV files are written in the output directory (`output` by default):

`legislators-support-oppose-count.csv`: one row per legislator that cast at
least one vote.

```text
id,name,num_supported_bills,num_opposed_bills
1,Biden,1,0
2,Trump,1,1
```

`bills.csv`: one row per bill, including the bills that were never voted on.
Bills without a sponsor, or with a sponsor that is not a known legislator, are
attributed to `Unknown`.

```text
id,title,supporter_count,opposer_count,primary_sponsor
10,Bill A,1,1,Biden
11,Bill B,1,0,Unknown
```

Vote results that refer to a vote missing from `votes` are ignored.

## Configuration

All the options can be given in a JSON file passed with `--config`. Command
line flags override the values of the file. Relative paths are resolved
against the directory of the configuration file.

```json
{
  "inputSettings": {
    "provider": "csv",
    "dataDirectory": "data",
    "billsFile": "bills.csv",
    "legislatorsFile": "legislators.csv",
    "votesFile": "votes.csv",
    "voteResultsFile": "vote_results.csv"
  },
  "outputSettings": {
    "outputDirectory": "output",
    "legislatorsFile": "legislators-support-oppose-count.csv",
    "billsFile": "bills.csv"
  }
}
```

For the `xlsx` provider, `workbookPath` points to the workbook and
`billsWorksheet`, `legislatorsWorksheet`, `votesWorksheet`,
`voteResultsWorksheet` name the worksheets.

## Checking against a reference

`--reference <dir>` compares the reports with the files of the same name in
`<dir>`. Differences are printed and the program fails without writing
anything.

*/
