/*!

This is the long-form manual for `convocation_list` and `convoca`.

## The convocation rule

Each program gets its own list. Positions are filled following a pattern that repeats
every 10 positions:

| position ends in | reserved for |
|------------------|--------------|
| 1                | PCD          |
| 3, 6, 9          | NEGRO        |
| 0, 2, 4, 5, 7, 8 | GERAL        |

For each position, the next candidate of the reserved pool who has not been convoked yet
takes it. When a PCD or NEGRO pool has nobody left, the position goes to the next candidate
of the GERAL pool, and the entry is marked GERAL. A GERAL position has no fallback.

A candidate may be ranked in several pools of the same program (for example both in the
NEGRO pool and in the GERAL pool). They are convoked once, at the first position they are
reached.

The list of a program ends as soon as a position cannot be filled. This can happen before
every candidate is listed: with an empty GERAL pool, a NEGRO candidate is never reached if a
PCD or GERAL position comes first. `convoca` logs a warning for every program in this
situation, and the JSON summary reports it under `courses`.

Candidates are identified by their name only. Two different people with exactly the same
name in the same program are merged into one entry.

## Levels and programs

A level (e.g. `ENSINO SUPERIOR`, `NÍVEL TÉCNICO`) has three pools, each a table of
(program, name) rows in rank order. The programs of a level are the ones listed in its GERAL
pool, processed in alphabetical order. A program that only shows up in the NEGRO or PCD pools
is ignored (with a warning).

The final list is the list of each level, one after the other, in the order of the
configuration. The same person convoked at two levels appears twice.

## Input formats

### `xlsx`

One worksheet per pool. The header row (by default row 4, as in the published
classification workbooks) must contain a program column (`CURSO`) and a name column
(`NOME`). Headers and values are trimmed. Rows with an empty program or name are skipped.

Worksheets are first looked up by their exact name, then by their trimmed name.

### `csv`

Same layout as `xlsx`, one file per pool. A leading UTF-8 byte order mark is ignored.

## Configuration

```json
{
  "outputSettings": {
    "listName": "Lista de Convocação",
    "outputFile": "lista_convocacao_gerada.csv",
    "summaryFile": "summary.json",
    "topPrograms": 10
  },
  "levels": [
    {
      "level": "ENSINO SUPERIOR",
      "geral": { "provider": "xlsx", "filePath": "classificacao.xlsx", "worksheetName": "SUPERIOR - AMPLA" },
      "negro": { "provider": "xlsx", "filePath": "classificacao.xlsx", "worksheetName": "SUPERIOR - NEGROS" },
      "pcd": { "provider": "xlsx", "filePath": "classificacao.xlsx", "worksheetName": "SUPERIOR - PCD" }
    }
  ]
}
```

Each pool source also accepts `headerRowIndex` (1-based), `programColumn` and `nameColumn`.
File paths are relative to the configuration file.

Without a configuration file, `convoca --input workbook.xlsx` uses the layout of the
published classification workbook: levels `ENSINO SUPERIOR` and `NÍVEL TÉCNICO`, with the
sheets `SUPERIOR - AMPLA`, `SUPERIOR - NEGROS`, `SUPERIOR - PCD`, `TECNICO - AMPLA`,
`TECNICO - NEGROS` and `TECNICO - PCD`.

## Output

The list is written as CSV (UTF-8 with a byte order mark, so that spreadsheet programs pick
the right encoding) with the columns `CLASSIFICAÇÃO`, `TIPO`, `CANDIDATO`, `CURSO`, `NÍVEL`.

*/
